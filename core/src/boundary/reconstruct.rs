//! Slab outline reconstruction from unordered boundary primitives.

use super::graph::PlanarGraph;
use super::types::BoundaryRecord;
use crate::geometry::{utils_2d, Polygon, Segment, Shape, EPSILON};
use crate::kernel::{KernelResult, PlanarKernel};
use crate::tributary::{TributaryConfig, TributaryError, TributaryResult};
use serde::Serialize;
use tracing::{debug, info, warn};

/// The slab outline used as the clipping region.
#[derive(Debug, Clone, Serialize)]
pub struct SlabOutline {
    /// Outline as reconstructed from the boundary primitives
    pub ring: Polygon,
    /// `ring` expanded by the closing tolerance; regions partition this
    pub clip: Shape,
    /// Other closed rings found in the boundary data
    pub discarded: Vec<Polygon>,
    /// Bounded faces inside the outline (internal boundary lines)
    pub interior_faces: usize,
}

impl SlabOutline {
    pub fn area(&self) -> f64 {
        self.clip.area()
    }
}

/// Merges boundary primitives into closed rings and picks the slab outline.
pub struct BoundaryReconstructor<'k, K: PlanarKernel> {
    kernel: &'k K,
    snap_tolerance: f64,
    closing_tolerance: f64,
    curve_segments: usize,
}

impl<'k, K: PlanarKernel> BoundaryReconstructor<'k, K> {
    pub fn new(kernel: &'k K, config: &TributaryConfig) -> Self {
        Self {
            kernel,
            snap_tolerance: config.snap_tolerance,
            closing_tolerance: config.closing_tolerance,
            curve_segments: config.curve_segments,
        }
    }

    /// Straight edges of every usable primitive. Degenerate primitives are dropped.
    pub fn flatten(&self, records: &[BoundaryRecord]) -> Vec<Segment> {
        let mut segments = Vec::new();
        for record in records {
            if record.geometry.is_degenerate(self.snap_tolerance) {
                debug!("Dropping degenerate boundary primitive {}", record.id);
                continue;
            }
            segments.extend(record.geometry.to_segments(self.curve_segments));
        }
        segments
    }

    /// Outer rings of every connected component, plus the number of bounded
    /// faces found inside them.
    pub fn rings(&self, segments: &[Segment]) -> (Vec<Polygon>, usize) {
        let mut graph = PlanarGraph::build(segments, self.snap_tolerance);
        debug!(
            "Boundary graph: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        let mut outer = Vec::new();
        let mut interior_faces = 0;
        for ring in graph.extract_rings() {
            if ring.signed_area > 0.0 {
                let polygon = Polygon::new(ring.vertices);
                let polygon = polygon.simplified(self.collinear_tolerance(&polygon));
                if !polygon.is_empty() {
                    outer.push(polygon);
                }
            } else {
                interior_faces += 1;
            }
        }
        (outer, interior_faces)
    }

    /// Deviation below which a vertex counts as lying on a straight edge.
    /// Bounded by the ring's own size so small curves keep their vertices.
    fn collinear_tolerance(&self, ring: &Polygon) -> f64 {
        match ring.bounds() {
            Some((min, max)) => self.snap_tolerance.min(nalgebra::distance(&min, &max) * EPSILON),
            None => self.snap_tolerance,
        }
    }

    pub fn reconstruct(&self, records: &[BoundaryRecord]) -> TributaryResult<SlabOutline> {
        let segments = self.flatten(records);
        let (rings, interior_faces) = self.rings(&segments);

        let (ring, discarded) = select_outline(rings).ok_or(TributaryError::NoClosedBoundary {
            primitives: records.len(),
        })?;

        if !discarded.is_empty() {
            warn!(
                "Boundary data has {} closed rings; using the largest (area {:.3}) as the slab outline",
                discarded.len() + 1,
                ring.area()
            );
            for (i, other) in discarded.iter().enumerate() {
                warn!(
                    "  Ignored ring {}: {} vertices, area {:.3}",
                    i,
                    other.len(),
                    other.area()
                );
            }
        }

        let clip = self.expand(&ring)?;
        info!(
            "Slab outline: {} vertices, area {:.3} ({:.3} after closing tolerance)",
            ring.len(),
            ring.area(),
            clip.area()
        );

        Ok(SlabOutline {
            ring,
            clip,
            discarded,
            interior_faces,
        })
    }

    /// Grow `ring` outward by the closing tolerance: the union of the ring
    /// with a rectangle swept along every edge.
    pub fn expand(&self, ring: &Polygon) -> KernelResult<Shape> {
        let t = self.closing_tolerance;
        if t <= 0.0 {
            return Ok(Shape::from(ring.clone()));
        }

        let mut grown = Shape::from(ring.clone());
        for edge in ring.edges() {
            let length = edge.length();
            if length <= 0.0 {
                continue;
            }
            let d = (edge.end - edge.start) / length * t;
            let n = utils_2d::perpendicular_ccw(&d);
            let strip = Polygon::new(vec![
                edge.start - d - n,
                edge.end + d - n,
                edge.end + d + n,
                edge.start - d + n,
            ]);
            grown = self.kernel.union(&grown, &Shape::from(strip))?;
        }

        Ok(match grown.largest_part() {
            Some(outline) => Shape::from(outline.simplified(t * 1e-3)),
            None => Shape::from(ring.clone()),
        })
    }
}

/// Pick the ring enclosing the largest area; the rest are returned as
/// discarded. Ties keep the ring found first.
pub fn select_outline(rings: Vec<Polygon>) -> Option<(Polygon, Vec<Polygon>)> {
    let mut best: Option<usize> = None;
    for (i, ring) in rings.iter().enumerate() {
        match best {
            Some(b) if rings[b].area() >= ring.area() => {}
            _ => best = Some(i),
        }
    }

    let best = best?;
    let mut rings = rings;
    let outline = rings.remove(best);
    Some((outline, rings))
}
