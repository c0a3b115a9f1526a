//! Per-point region construction: slab ∩ every bisector half-plane.

use super::half_plane::{half_plane_polygon, Bisector};
use crate::geometry::{BoundingEnvelope, Point2, Shape};
use crate::kernel::{KernelResult, PlanarKernel};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Builds the tributary region of each point against a shared slab.
pub struct RegionBuilder<'a, K: PlanarKernel> {
    kernel: &'a K,
    slab: &'a Shape,
    points: &'a [Point2],
    envelope: BoundingEnvelope,
    tolerance: f64,
    parallel: bool,
}

impl<'a, K: PlanarKernel> RegionBuilder<'a, K> {
    pub fn new(
        kernel: &'a K,
        slab: &'a Shape,
        points: &'a [Point2],
        envelope: BoundingEnvelope,
        tolerance: f64,
    ) -> Self {
        Self {
            kernel,
            slab,
            points,
            envelope,
            tolerance,
            parallel: true,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Regions of every point, in point order.
    pub fn build_all(&self) -> KernelResult<Vec<Shape>> {
        if self.parallel {
            (0..self.points.len())
                .into_par_iter()
                .map(|i| self.build(i))
                .collect()
        } else {
            (0..self.points.len()).map(|i| self.build(i)).collect()
        }
    }

    /// Region of point `index`.
    pub fn build(&self, index: usize) -> KernelResult<Shape> {
        let p = self.points[index];
        let tol = self.tolerance * self.envelope.extent();
        let mut region = self.slab.clone();

        for j in self.neighbours_by_distance(index) {
            let q = self.points[j];
            let Some(bisector) = Bisector::between(&p, &q) else {
                trace!("Point {} coincides with point {}; constraint skipped", index, j);
                continue;
            };

            let (nearest, farthest) = region
                .vertices()
                .map(|v| bisector.signed_distance(v))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)));

            if farthest <= tol {
                continue;
            }
            if nearest > tol {
                region = Shape::empty();
            } else {
                let Some(half_plane) =
                    half_plane_polygon(self.kernel, &p, &q, &self.envelope, self.tolerance)?
                else {
                    trace!("Degenerate half-plane between points {} and {}", index, j);
                    continue;
                };
                region = self.kernel.intersection(&region, &Shape::from(half_plane))?;
            }

            if region.is_empty() {
                debug!("Region of point {} emptied by point {}", index, j);
                break;
            }
        }

        Ok(region)
    }

    /// Other point indices, nearest first, ties by index.
    fn neighbours_by_distance(&self, index: usize) -> Vec<usize> {
        let p = self.points[index];
        let mut others: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(j, q)| (nalgebra::distance_squared(&p, q), j))
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        others.into_iter().map(|(_, j)| j).collect()
    }
}
