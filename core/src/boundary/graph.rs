//! Planar graph over boundary segments.
//!
//! Extracts closed rings from unordered edges by:
//! 1. Splitting segments at crossings, T-junctions and collinear overlaps
//! 2. Snapping endpoints into shared vertices
//! 3. Pruning dangling filaments
//! 4. Traversing half-edges to find closed cycles

use crate::geometry::{utils_2d, Point2, Segment};
use std::collections::{HashMap, HashSet};

/// A closed cycle found by the half-edge traversal.
#[derive(Debug, Clone)]
pub struct Ring {
    pub vertices: Vec<Point2>,
    /// Positive for the outer boundary of a connected component,
    /// negative for bounded faces.
    pub signed_area: f64,
}

/// A vertex in the planar graph
#[derive(Debug, Clone)]
struct GraphVertex {
    pos: Point2,
    /// Outgoing half-edges
    edges: Vec<usize>,
}

/// A half-edge in the planar graph
#[derive(Debug, Clone)]
struct HalfEdge {
    start: usize,
    end: usize,
    twin: usize,
    /// Next half-edge in face traversal
    next: Option<usize>,
    /// Consumed by face extraction
    used: bool,
    /// Pruned as part of a filament
    removed: bool,
}

#[derive(Debug, Default)]
pub struct PlanarGraph {
    vertices: Vec<GraphVertex>,
    edges: Vec<HalfEdge>,
    snap_tolerance: f64,
    grid: HashMap<(i64, i64), Vec<usize>>,
}

impl PlanarGraph {
    /// Build the graph from unordered segments. Endpoints closer than
    /// `snap_tolerance` are merged.
    pub fn build(segments: &[Segment], snap_tolerance: f64) -> Self {
        let mut graph = Self {
            snap_tolerance: snap_tolerance.max(f64::EPSILON),
            ..Self::default()
        };

        let pieces = node_segments(segments, graph.snap_tolerance);
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for piece in pieces {
            let v1 = graph.vertex_at(piece.start);
            let v2 = graph.vertex_at(piece.end);
            if v1 == v2 {
                continue;
            }
            // Overlapping input edges collapse into one
            if !seen.insert((v1.min(v2), v1.max(v2))) {
                continue;
            }
            graph.add_edge_pair(v1, v2);
        }

        graph.prune_filaments();
        graph.link_half_edges();
        graph
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges that survived filament pruning.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.removed).count() / 2
    }

    fn grid_key(&self, p: &Point2) -> (i64, i64) {
        (
            (p.x / self.snap_tolerance).round() as i64,
            (p.y / self.snap_tolerance).round() as i64,
        )
    }

    fn vertex_at(&mut self, pos: Point2) -> usize {
        let (kx, ky) = self.grid_key(&pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(candidates) = self.grid.get(&(kx + dx, ky + dy)) {
                    for &idx in candidates {
                        if nalgebra::distance(&self.vertices[idx].pos, &pos) <= self.snap_tolerance {
                            return idx;
                        }
                    }
                }
            }
        }

        let idx = self.vertices.len();
        self.vertices.push(GraphVertex { pos, edges: Vec::new() });
        self.grid.entry((kx, ky)).or_default().push(idx);
        idx
    }

    fn add_edge_pair(&mut self, v1: usize, v2: usize) {
        let e1 = self.edges.len();
        let e2 = e1 + 1;
        self.edges.push(HalfEdge { start: v1, end: v2, twin: e2, next: None, used: false, removed: false });
        self.edges.push(HalfEdge { start: v2, end: v1, twin: e1, next: None, used: false, removed: false });
        self.vertices[v1].edges.push(e1);
        self.vertices[v2].edges.push(e2);
    }

    /// Iteratively remove degree-1 vertices (dead ends) and their incident edges
    fn prune_filaments(&mut self) {
        loop {
            let mut degree = vec![0usize; self.vertices.len()];
            for edge in self.edges.iter().filter(|e| !e.removed) {
                degree[edge.start] += 1;
            }

            let mut changed = false;
            for idx in 0..self.edges.len() {
                let edge = &self.edges[idx];
                if !edge.removed && (degree[edge.start] == 1 || degree[edge.end] == 1) {
                    let twin = edge.twin;
                    self.edges[idx].removed = true;
                    self.edges[twin].removed = true;
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        let edges = &self.edges;
        for vertex in self.vertices.iter_mut() {
            vertex.edges.retain(|&e| !edges[e].removed);
        }
    }

    /// Link half-edges by sorting edges around each vertex by angle.
    /// Arriving at a vertex, the walk leaves along the next edge
    /// counter-clockwise from the way it came in, so bounded faces come
    /// out clockwise and outer boundaries counter-clockwise.
    fn link_half_edges(&mut self) {
        for v in 0..self.vertices.len() {
            let pos = self.vertices[v].pos;
            let mut sorted = self.vertices[v].edges.clone();
            if sorted.is_empty() {
                continue;
            }
            sorted.sort_by(|&a, &b| {
                let angle = |e: usize| {
                    let end = self.vertices[self.edges[e].end].pos;
                    (end.y - pos.y).atan2(end.x - pos.x)
                };
                angle(a).total_cmp(&angle(b))
            });

            for i in 0..sorted.len() {
                let outgoing = sorted[i];
                let next_outgoing = sorted[(i + 1) % sorted.len()];
                let incoming = self.edges[outgoing].twin;
                self.edges[incoming].next = Some(next_outgoing);
            }
        }
    }

    /// Extract every closed cycle by following half-edge chains.
    ///
    /// A walk that visits a vertex twice (loops touching at a vertex, or
    /// joined by a bridge edge) is cut into simple loops. Bridge stretches
    /// walked out and back enclose no area and are dropped, as are loops
    /// wound against the walk as a whole.
    pub fn extract_rings(&mut self) -> Vec<Ring> {
        let mut rings = Vec::new();
        let max_steps = self.edges.len() + 1;

        for start_edge in 0..self.edges.len() {
            if self.edges[start_edge].used || self.edges[start_edge].removed {
                continue;
            }

            let mut walk = Vec::new();
            let mut current = start_edge;
            let mut closed = false;

            for _ in 0..max_steps {
                if self.edges[current].used {
                    break;
                }
                self.edges[current].used = true;
                walk.push(self.edges[current].start);

                match self.edges[current].next {
                    Some(next) if next == start_edge => {
                        closed = true;
                        break;
                    }
                    Some(next) => current = next,
                    None => break, // Dead end
                }
            }

            if !closed || walk.len() < 3 {
                continue;
            }

            let positions = |ids: &[usize]| -> Vec<Point2> { ids.iter().map(|&v| self.vertices[v].pos).collect() };
            let walk_area = utils_2d::polygon_signed_area(&positions(&walk));
            for cycle in split_at_repeated_vertices(&walk) {
                if cycle.len() < 3 {
                    continue;
                }
                let vertices = positions(&cycle);
                let signed_area = utils_2d::polygon_signed_area(&vertices);
                if signed_area == 0.0 || signed_area.signum() != walk_area.signum() {
                    continue;
                }
                rings.push(Ring { vertices, signed_area });
            }
        }

        rings
    }
}

/// Cut a closed walk over vertex ids into cycles that visit each vertex once.
fn split_at_repeated_vertices(walk: &[usize]) -> Vec<Vec<usize>> {
    let mut cycles = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(walk.len());
    for &v in walk {
        if let Some(pos) = stack.iter().position(|&u| u == v) {
            cycles.push(stack.split_off(pos));
        }
        stack.push(v);
    }
    if !stack.is_empty() {
        cycles.push(stack);
    }
    cycles
}

/// Split every segment at the points where other segments cross or touch it.
fn node_segments(segments: &[Segment], tolerance: f64) -> Vec<Segment> {
    let mut pieces = Vec::with_capacity(segments.len());

    for (i, seg) in segments.iter().enumerate() {
        let length = seg.length();
        if length <= tolerance {
            continue;
        }

        let mut params: Vec<f64> = vec![0.0, 1.0];
        for (j, other) in segments.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some((_, t, _)) = utils_2d::segment_intersection(&seg.start, &seg.end, &other.start, &other.end, 0.0) {
                params.push(t);
            }
            // Endpoints resting on this segment: T-junctions and collinear overlaps
            for end in [other.start, other.end] {
                if utils_2d::distance_point_to_segment(&seg.start, &seg.end, &end) <= tolerance {
                    params.push(utils_2d::project_point_on_line(&seg.start, &seg.end, &end));
                }
            }
        }

        params.iter_mut().for_each(|t| *t = t.clamp(0.0, 1.0));
        params.sort_by(|a, b| a.total_cmp(b));
        params.dedup_by(|a, b| (*a - *b) * length <= tolerance);

        for w in params.windows(2) {
            pieces.push(Segment::new(
                utils_2d::lerp(&seg.start, &seg.end, w[0]),
                utils_2d::lerp(&seg.start, &seg.end, w[1]),
            ));
        }
    }

    pieces
}
