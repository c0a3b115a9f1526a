//! 2D geometry utilities for slab outlines and tributary regions.
//!
//! This module provides pure 2D geometry functions that are reused across
//! the codebase for intersection detection, containment tests, and
//! polygon measurements.

use super::{Point2, Vector2, EPSILON};
use std::f64::consts::PI;

// =============================================================================
// Point Operations
// =============================================================================

/// Check if two 2D points are within `tolerance` of each other on both axes.
#[inline]
pub fn points_equal(p1: &Point2, p2: &Point2, tolerance: f64) -> bool {
    (p1.x - p2.x).abs() <= tolerance && (p1.y - p2.y).abs() <= tolerance
}

/// Linear interpolation between two 2D points.
#[inline]
pub fn lerp(p1: &Point2, p2: &Point2, t: f64) -> Point2 {
    *p1 + (*p2 - *p1) * t
}

// =============================================================================
// Vector Operations
// =============================================================================

/// 2D cross product (z-component of 3D cross product).
/// Positive if v2 is counter-clockwise from v1.
#[inline]
pub fn cross_2d(v1: &Vector2, v2: &Vector2) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// Perpendicular vector (90° counter-clockwise rotation).
#[inline]
pub fn perpendicular_ccw(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

// =============================================================================
// Line Segment Operations
// =============================================================================

/// Find parameter t where point projects onto line segment.
/// Returns t such that point ≈ start + t * (end - start).
/// t in [0,1] means projection is on segment.
pub fn project_point_on_line(start: &Point2, end: &Point2, point: &Point2) -> f64 {
    let d = *end - *start;
    let len_sq = d.norm_squared();

    if len_sq < EPSILON * EPSILON {
        return 0.0;
    }

    (*point - *start).dot(&d) / len_sq
}

/// Compute distance from point to a finite line segment.
pub fn distance_point_to_segment(start: &Point2, end: &Point2, point: &Point2) -> f64 {
    let t = project_point_on_line(start, end, point).clamp(0.0, 1.0);
    nalgebra::distance(&lerp(start, end, t), point)
}

/// Calculate the crossing of two 2D line segments.
///
/// Returns `Some((point, t, u))` where `t` and `u` are the parameters along
/// the first and second segment, or `None` for parallel segments and
/// crossings outside either span (with `tolerance` slack on the parameters).
pub fn segment_intersection(
    s1: &Point2,
    e1: &Point2,
    s2: &Point2,
    e2: &Point2,
    tolerance: f64,
) -> Option<(Point2, f64, f64)> {
    let d1 = *e1 - *s1;
    let d2 = *e2 - *s2;

    let denom = cross_2d(&d1, &d2);
    if denom.abs() < EPSILON * d1.norm() * d2.norm() {
        return None; // Parallel or collinear
    }

    let offset = *s2 - *s1;
    let t = cross_2d(&offset, &d2) / denom;
    let u = cross_2d(&offset, &d1) / denom;

    let in_span = |v: f64| v >= -tolerance && v <= 1.0 + tolerance;
    if in_span(t) && in_span(u) {
        Some((*s1 + d1 * t, t, u))
    } else {
        None
    }
}

// =============================================================================
// Polygon Operations
// =============================================================================

/// Compute signed area of a polygon using the Shoelace formula.
/// Positive = CCW winding, Negative = CW winding.
pub fn polygon_signed_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }
    area / 2.0
}

/// Compute absolute area of a polygon.
pub fn polygon_area(vertices: &[Point2]) -> f64 {
    polygon_signed_area(vertices).abs()
}

/// Compute centroid of a polygon.
pub fn polygon_centroid(vertices: &[Point2]) -> Point2 {
    let n = vertices.len();
    if n == 0 {
        return Point2::origin();
    }
    if n < 3 {
        return nalgebra::center(&vertices[0], &vertices[n - 1]);
    }

    // Shift to the first vertex to keep the cross products well conditioned
    // for coordinates far from the origin.
    let origin = vertices[0];
    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..n {
        let a = vertices[i] - origin;
        let b = vertices[(i + 1) % n] - origin;
        let cross = a.x * b.y - b.x * a.y;
        signed_area += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    signed_area /= 2.0;

    if signed_area.abs() > EPSILON * EPSILON {
        Point2::new(origin.x + cx / (6.0 * signed_area), origin.y + cy / (6.0 * signed_area))
    } else {
        // Degenerate polygon: use average
        let sum = vertices.iter().fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / n as f64)
    }
}

/// Test if a point is inside a polygon using the winding number algorithm.
/// Works for both convex and concave polygons.
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut winding: i32 = 0;

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        let cross = (p2.x - p1.x) * (point.y - p1.y) - (p2.y - p1.y) * (point.x - p1.x);

        if p1.y <= point.y {
            if p2.y > point.y && cross > 0.0 {
                winding += 1; // Upward crossing
            }
        } else if p2.y <= point.y && cross < 0.0 {
            winding -= 1; // Downward crossing
        }
    }

    winding != 0
}

/// Drop consecutive duplicates and vertices lying on the line through their
/// neighbours. `tolerance` is a distance in working units.
pub fn remove_collinear(vertices: &[Point2], tolerance: f64) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(vertices.len());
    for p in vertices {
        if ring.last().map_or(true, |last| nalgebra::distance(last, p) > tolerance) {
            ring.push(*p);
        }
    }
    while ring.len() > 1 && nalgebra::distance(&ring[0], &ring[ring.len() - 1]) <= tolerance {
        ring.pop();
    }

    // Repeat until stable: removing one vertex can make its neighbour collinear.
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let chord = next - prev;
            let len = chord.norm();
            let offset = ring[i] - prev;
            let deviation = if len > EPSILON {
                cross_2d(&chord, &offset).abs() / len
            } else {
                offset.norm()
            };
            if deviation <= tolerance {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }

    ring
}

// =============================================================================
// Arc Utilities
// =============================================================================

/// Compute a point on an arc given center, radius, and angle (radians).
#[inline]
pub fn arc_point(center: &Point2, radius: f64, angle: f64) -> Point2 {
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Discretize a counter-clockwise arc into line segments.
/// Returns `segments + 1` points from start_angle to end_angle (radians).
pub fn discretize_arc(
    center: &Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    segments: usize,
) -> Vec<Point2> {
    let mut sweep = end_angle - start_angle;

    // Normalize sweep to be positive for CCW traversal
    if sweep <= 0.0 {
        sweep += 2.0 * PI;
    }

    let segments = segments.max(1);
    let mut points = Vec::with_capacity(segments + 1);

    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let angle = start_angle + t * sweep;
        points.push(arc_point(center, radius, angle));
    }

    points
}

/// Discretize a full circle into line segments.
pub fn discretize_circle(center: &Point2, radius: f64, segments: usize) -> Vec<Point2> {
    let segments = segments.max(3);
    let mut points = Vec::with_capacity(segments);

    for i in 0..segments {
        let angle = (i as f64 / segments as f64) * 2.0 * PI;
        points.push(arc_point(center, radius, angle));
    }

    points
}

// =============================================================================
// Tests
// =============================================================================
