//! Polygon types shared by boundary reconstruction and region building.
//!
//! A [`Polygon`] is a single simple ring normalized to counter-clockwise
//! winding; a [`Shape`] is a set of disjoint polygons, which is what an
//! intersection against a concave slab can produce.

use super::utils_2d;
use super::{Point2, EPSILON};
use serde::{Deserialize, Serialize};

/// An undirected straight edge of a slab outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    /// True when the endpoints coincide within `tolerance`.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.length() <= tolerance
    }
}

/// A closed simple ring, counter-clockwise, without a repeated closing vertex.
///
/// An empty polygon (no vertices) stands for a degenerate result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Build a polygon from an ordered ring, dropping exact consecutive
    /// duplicates and a closing vertex, and normalizing to CCW.
    /// Rings with fewer than 3 distinct vertices or zero area become empty.
    pub fn new(vertices: Vec<Point2>) -> Self {
        let mut ring: Vec<Point2> = Vec::with_capacity(vertices.len());
        for p in vertices {
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let signed_area = utils_2d::polygon_signed_area(&ring);
        if ring.len() < 3 || signed_area == 0.0 {
            return Self::empty();
        }
        if signed_area < 0.0 {
            ring.reverse();
        }

        Self { vertices: ring }
    }

    pub fn empty() -> Self {
        Self { vertices: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Edges in ring order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn area(&self) -> f64 {
        utils_2d::polygon_area(&self.vertices)
    }

    pub fn centroid(&self) -> Option<Point2> {
        if self.is_empty() {
            None
        } else {
            Some(utils_2d::polygon_centroid(&self.vertices))
        }
    }

    pub fn contains(&self, point: &Point2) -> bool {
        utils_2d::point_in_polygon(point, &self.vertices)
    }

    /// Axis-aligned (min, max) corners.
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        bounds_of(self.vertices.iter())
    }

    /// Remove vertices that lie within `tolerance` of the line through their
    /// neighbours.
    pub fn simplified(&self, tolerance: f64) -> Self {
        Self::new(utils_2d::remove_collinear(&self.vertices, tolerance))
    }

    /// True if the ring is non-empty and no two non-adjacent edges cross or
    /// touch. An empty polygon, including a rejected zero-area bowtie, is not
    /// simple.
    pub fn is_simple(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let edges: Vec<Segment> = self.edges().collect();
        let n = edges.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (a, b) = (&edges[i], &edges[j]);
                if utils_2d::segment_intersection(&a.start, &a.end, &b.start, &b.end, 0.0).is_some() {
                    return false;
                }
            }
        }
        true
    }
}

/// A set of disjoint simple polygons. Empty when it has no parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Shape {
    parts: Vec<Polygon>,
}

impl Shape {
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Keeps only non-empty parts with a measurable area.
    pub fn from_parts(parts: impl IntoIterator<Item = Polygon>) -> Self {
        Self {
            parts: parts
                .into_iter()
                .filter(|p| !p.is_empty() && p.area() > EPSILON * EPSILON)
                .collect(),
        }
    }

    pub fn parts(&self) -> &[Polygon] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Point2> {
        self.parts.iter().flat_map(|p| p.vertices().iter())
    }

    pub fn area(&self) -> f64 {
        self.parts.iter().map(Polygon::area).sum()
    }

    /// Area-weighted centroid of all parts.
    pub fn centroid(&self) -> Option<Point2> {
        let total = self.area();
        if total <= 0.0 {
            return None;
        }
        let weighted = self.parts.iter().fold(nalgebra::Vector2::zeros(), |acc, part| {
            match part.centroid() {
                Some(c) => acc + c.coords * part.area(),
                None => acc,
            }
        });
        Some(Point2::from(weighted / total))
    }

    pub fn contains(&self, point: &Point2) -> bool {
        self.parts.iter().any(|p| p.contains(point))
    }

    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        bounds_of(self.vertices())
    }

    /// The part with the largest area, if any.
    pub fn largest_part(&self) -> Option<&Polygon> {
        self.parts
            .iter()
            .max_by(|a, b| a.area().partial_cmp(&b.area()).unwrap_or(std::cmp::Ordering::Equal))
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Self::from_parts([polygon])
    }
}

fn bounds_of<'a>(mut points: impl Iterator<Item = &'a Point2>) -> Option<(Point2, Point2)> {
    let first = points.next()?;
    let (mut min, mut max) = (*first, *first);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}
