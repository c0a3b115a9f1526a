//! Perpendicular-bisector half-planes clipped to the bounding envelope.

use crate::geometry::{BoundingEnvelope, Point2, Polygon, EPSILON};
use crate::kernel::{KernelResult, PlanarKernel};

/// The perpendicular bisector of P and Q as `a·x + b·y = c`.
///
/// `a·x + b·y <= c` is the side of P.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisector {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    norm: f64,
}

impl Bisector {
    /// `None` when P and Q coincide.
    pub fn between(p: &Point2, q: &Point2) -> Option<Self> {
        let a = q.x - p.x;
        let b = q.y - p.y;
        let norm = (a * a + b * b).sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        let c = (q.x * q.x + q.y * q.y - p.x * p.x - p.y * p.y) / 2.0;
        Some(Self { a, b, c, norm })
    }

    /// Euclidean distance past the bisector; negative on P's side.
    pub fn signed_distance(&self, v: &Point2) -> f64 {
        (self.a * v.x + self.b * v.y - self.c) / self.norm
    }

    /// Crossing with the horizontal line `y = y0`, if not parallel to it.
    fn x_at(&self, y0: f64) -> Option<f64> {
        (self.a.abs() > EPSILON * self.norm).then(|| (self.c - self.b * y0) / self.a)
    }

    /// Crossing with the vertical line `x = x0`, if not parallel to it.
    fn y_at(&self, x0: f64) -> Option<f64> {
        (self.b.abs() > EPSILON * self.norm).then(|| (self.c - self.a * x0) / self.b)
    }
}

/// Convex polygon of the envelope points at least as close to `p` as to `q`.
///
/// `tolerance` is relative to the envelope extent and lets points exactly on
/// the bisector count as inside. Returns `None` when the points coincide or
/// the clipped half-plane has no area; callers skip such constraints.
pub fn half_plane_polygon<K: PlanarKernel + ?Sized>(
    kernel: &K,
    p: &Point2,
    q: &Point2,
    envelope: &BoundingEnvelope,
    tolerance: f64,
) -> KernelResult<Option<Polygon>> {
    let Some(bisector) = Bisector::between(p, q) else {
        return Ok(None);
    };
    let tol = tolerance * envelope.extent();

    let mut candidates: Vec<Point2> = envelope
        .corners()
        .into_iter()
        .filter(|corner| bisector.signed_distance(corner) <= tol)
        .collect();

    let within = |v: f64, lo: f64, hi: f64| v >= lo - tol && v <= hi + tol;
    for y0 in [envelope.min_y, envelope.max_y] {
        if let Some(x0) = bisector.x_at(y0) {
            if within(x0, envelope.min_x, envelope.max_x) {
                candidates.push(Point2::new(x0.clamp(envelope.min_x, envelope.max_x), y0));
            }
        }
    }
    for x0 in [envelope.min_x, envelope.max_x] {
        if let Some(y0) = bisector.y_at(x0) {
            if within(y0, envelope.min_y, envelope.max_y) {
                candidates.push(Point2::new(x0, y0.clamp(envelope.min_y, envelope.max_y)));
            }
        }
    }

    if candidates.len() < 3 {
        return Ok(None);
    }
    let hull = kernel.convex_hull(&candidates)?;
    Ok((!hull.is_empty()).then_some(hull))
}
