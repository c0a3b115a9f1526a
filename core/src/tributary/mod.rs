//! Tributary area partitioning.
//!
//! Each column point gets the part of the slab that is closer to it than to
//! any other column: the slab intersected with one bisector half-plane per
//! other point. Regions are independent, so they are built in parallel.

pub mod config;
pub mod half_plane;
pub mod pipeline;
pub mod ranking;
pub mod region;
pub mod types;

#[cfg(test)]
mod tests_partition;

pub use config::TributaryConfig;
pub use half_plane::half_plane_polygon;
pub use pipeline::{run, TributaryAnalysis};
pub use ranking::rank_regions;
pub use region::RegionBuilder;
pub use types::*;

use crate::kernel::KernelOpError;
use thiserror::Error;

/// Errors that abort a tributary run.
#[derive(Debug, Error)]
pub enum TributaryError {
    #[error("No closed boundary ring found among {primitives} boundary primitive(s); there is no slab to partition")]
    NoClosedBoundary { primitives: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed records: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Kernel(#[from] KernelOpError),
}

/// Result type for tributary operations.
pub type TributaryResult<T> = Result<T, TributaryError>;
