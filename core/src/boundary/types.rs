use crate::geometry::{utils_2d, Point2, Segment};
use serde::{Deserialize, Serialize};

/// Geometry of one boundary primitive as extracted from the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryGeometry {
    Segment { start: Point2, end: Point2 },
    Polyline {
        vertices: Vec<Point2>,
        #[serde(default)]
        closed: bool,
    },
    Circle { center: Point2, radius: f64 },
    /// Counter-clockwise arc; angles in degrees from the positive x-axis.
    Arc { center: Point2, radius: f64, start_angle: f64, end_angle: f64 },
}

/// A boundary record `{id, kind, ...}` handed over by the extraction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    pub id: u64,
    #[serde(flatten)]
    pub geometry: BoundaryGeometry,
}

impl BoundaryRecord {
    pub fn new(id: u64, geometry: BoundaryGeometry) -> Self {
        Self { id, geometry }
    }

    pub fn segment(id: u64, start: [f64; 2], end: [f64; 2]) -> Self {
        Self::new(
            id,
            BoundaryGeometry::Segment {
                start: Point2::new(start[0], start[1]),
                end: Point2::new(end[0], end[1]),
            },
        )
    }
}

impl BoundaryGeometry {
    /// Zero-length segments, polylines with fewer than two distinct vertices,
    /// non-positive radii and zero-sweep arcs contribute no edges.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        match self {
            Self::Segment { start, end } => Segment::new(*start, *end).is_degenerate(tolerance),
            Self::Polyline { vertices, .. } => {
                vertices.len() < 2
                    || vertices
                        .windows(2)
                        .all(|w| utils_2d::points_equal(&w[0], &w[1], tolerance))
            }
            Self::Circle { radius, .. } => *radius <= tolerance,
            Self::Arc { radius, start_angle, end_angle, .. } => {
                *radius <= tolerance || start_angle == end_angle
            }
        }
    }

    /// True if every coordinate, radius and angle is finite.
    pub fn is_finite(&self) -> bool {
        let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        match self {
            Self::Segment { start, end } => finite(start) && finite(end),
            Self::Polyline { vertices, .. } => vertices.iter().all(finite),
            Self::Circle { center, radius } => finite(center) && radius.is_finite(),
            Self::Arc { center, radius, start_angle, end_angle } => {
                finite(center) && radius.is_finite() && start_angle.is_finite() && end_angle.is_finite()
            }
        }
    }

    /// Scale all lengths by `factor` (unit conversion). Angles are untouched.
    pub fn scaled(&self, factor: f64) -> Self {
        let s = |p: &Point2| Point2::new(p.x * factor, p.y * factor);
        match self {
            Self::Segment { start, end } => Self::Segment { start: s(start), end: s(end) },
            Self::Polyline { vertices, closed } => Self::Polyline {
                vertices: vertices.iter().map(s).collect(),
                closed: *closed,
            },
            Self::Circle { center, radius } => Self::Circle {
                center: s(center),
                radius: radius * factor,
            },
            Self::Arc { center, radius, start_angle, end_angle } => Self::Arc {
                center: s(center),
                radius: radius * factor,
                start_angle: *start_angle,
                end_angle: *end_angle,
            },
        }
    }

    /// Straight edges approximating this primitive. Curves use
    /// `curve_segments` edges per full turn, at least one per arc.
    pub fn to_segments(&self, curve_segments: usize) -> Vec<Segment> {
        match self {
            Self::Segment { start, end } => vec![Segment::new(*start, *end)],
            Self::Polyline { vertices, closed } => {
                let mut segments: Vec<Segment> = vertices
                    .windows(2)
                    .map(|w| Segment::new(w[0], w[1]))
                    .collect();
                if *closed && vertices.len() > 2 {
                    segments.push(Segment::new(vertices[vertices.len() - 1], vertices[0]));
                }
                segments
            }
            Self::Circle { center, radius } => {
                let pts = utils_2d::discretize_circle(center, *radius, curve_segments);
                let n = pts.len();
                (0..n).map(|i| Segment::new(pts[i], pts[(i + 1) % n])).collect()
            }
            Self::Arc { center, radius, start_angle, end_angle } => {
                let start = start_angle.to_radians();
                let mut sweep = end_angle.to_radians() - start;
                if sweep <= 0.0 {
                    sweep += std::f64::consts::TAU;
                }
                let count = ((sweep / std::f64::consts::TAU) * curve_segments as f64 - 1e-9).ceil() as usize;
                let pts = utils_2d::discretize_arc(center, *radius, start, start + sweep, count.max(1));
                pts.windows(2).map(|w| Segment::new(w[0], w[1])).collect()
            }
        }
    }
}
