//! Kernel abstraction layer for planar polygon operations.
//!
//! This module provides a trait-based abstraction over the underlying 2D
//! geometry library, allowing for swapping implementations (e.g., `geo` →
//! a hand-written Weiler–Atherton clipper) without changing the region
//! builder or the boundary reconstructor.

mod geo_backend;

#[cfg(test)]
mod tests_boolean;

pub use geo_backend::GeoKernel;

use crate::geometry::{Point2, Polygon, Shape};
use thiserror::Error;

/// Errors that can occur during kernel operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelOpError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelOpError>;

/// Abstract interface for the 2D polygon operations the pipeline needs.
///
/// Implementations must support simple, possibly concave, polygons on both
/// operands of the boolean operations.
pub trait PlanarKernel: Send + Sync {
    /// Compute the intersection of two shapes (A ∩ B).
    fn intersection(&self, a: &Shape, b: &Shape) -> KernelResult<Shape>;

    /// Compute the union of two shapes (A ∪ B).
    fn union(&self, a: &Shape, b: &Shape) -> KernelResult<Shape>;

    /// Convex hull of a point set. Empty when the points are collinear.
    fn convex_hull(&self, points: &[Point2]) -> KernelResult<Polygon>;

    fn area(&self, shape: &Shape) -> f64 {
        shape.area()
    }

    fn centroid(&self, shape: &Shape) -> Option<Point2> {
        shape.centroid()
    }
}

/// Get the default kernel implementation.
pub fn default_kernel() -> GeoKernel {
    GeoKernel::new()
}

pub(crate) fn ensure_finite<'a>(
    what: &str,
    points: impl IntoIterator<Item = &'a Point2>,
) -> KernelResult<()> {
    match points.into_iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        Some(p) => Err(KernelOpError::InvalidGeometry(format!(
            "{} has non-finite coordinate ({}, {})",
            what, p.x, p.y
        ))),
        None => Ok(()),
    }
}
