//! [`PlanarKernel`] implemented on top of the `geo` crate.

use super::{ensure_finite, KernelOpError, KernelResult, PlanarKernel};
use crate::geometry::{Point2, Polygon, Shape};
use geo::{Area, BooleanOps, Centroid, ConvexHull, Coord, LineString, MultiPoint, MultiPolygon};
use tracing::debug;

/// Boolean operations via `geo::BooleanOps`, which handles concave operands.
#[derive(Debug, Clone, Default)]
pub struct GeoKernel;

impl GeoKernel {
    pub fn new() -> Self {
        Self
    }
}

fn to_geo_polygon(polygon: &Polygon) -> geo::Polygon<f64> {
    let coords: Vec<Coord<f64>> = polygon
        .vertices()
        .iter()
        .map(|v| Coord { x: v.x, y: v.y })
        .collect();
    geo::Polygon::new(LineString::new(coords), vec![])
}

fn to_multi_polygon(shape: &Shape) -> MultiPolygon<f64> {
    MultiPolygon::new(shape.parts().iter().map(to_geo_polygon).collect())
}

fn ring_to_polygon(ring: LineString<f64>) -> Polygon {
    Polygon::new(ring.into_inner().into_iter().map(|c| Point2::new(c.x, c.y)).collect())
}

fn from_multi_polygon(result: MultiPolygon<f64>) -> KernelResult<Shape> {
    let mut parts = Vec::new();
    for polygon in result {
        let (exterior, interiors) = polygon.into_inner();
        if !interiors.is_empty() {
            // Slab outlines carry no holes; a hole here comes from nearly
            // closed notches and is filled.
            debug!("Dropping {} interior ring(s) from kernel result", interiors.len());
        }
        parts.push(ring_to_polygon(exterior));
    }

    let shape = Shape::from_parts(parts);
    ensure_finite("kernel result", shape.vertices())
        .map_err(|e| KernelOpError::OperationFailed(e.to_string()))?;
    Ok(shape)
}

impl PlanarKernel for GeoKernel {
    fn intersection(&self, a: &Shape, b: &Shape) -> KernelResult<Shape> {
        if a.is_empty() || b.is_empty() {
            return Ok(Shape::empty());
        }
        ensure_finite("left operand", a.vertices())?;
        ensure_finite("right operand", b.vertices())?;

        let result = to_multi_polygon(a).intersection(&to_multi_polygon(b));
        from_multi_polygon(result)
    }

    fn union(&self, a: &Shape, b: &Shape) -> KernelResult<Shape> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }
        ensure_finite("left operand", a.vertices())?;
        ensure_finite("right operand", b.vertices())?;

        let result = to_multi_polygon(a).union(&to_multi_polygon(b));
        from_multi_polygon(result)
    }

    fn convex_hull(&self, points: &[Point2]) -> KernelResult<Polygon> {
        ensure_finite("hull input", points)?;
        if points.len() < 3 {
            return Ok(Polygon::empty());
        }

        let multi: MultiPoint<f64> = points
            .iter()
            .map(|p| geo::Point::new(p.x, p.y))
            .collect::<Vec<_>>()
            .into();
        let (exterior, _) = multi.convex_hull().into_inner();
        Ok(ring_to_polygon(exterior))
    }

    fn area(&self, shape: &Shape) -> f64 {
        to_multi_polygon(shape).unsigned_area()
    }

    fn centroid(&self, shape: &Shape) -> Option<Point2> {
        if shape.is_empty() {
            return None;
        }
        to_multi_polygon(shape)
            .centroid()
            .map(|c| Point2::new(c.x(), c.y()))
    }
}
