//! End-to-end tributary run: validate, convert units, reconstruct the slab,
//! build and rank regions, check the partition.

use super::ranking::rank_regions;
use super::region::RegionBuilder;
use super::types::{Diagnostics, PointRecord, TributaryInput, TributaryRegion, TributaryReport};
use super::{TributaryConfig, TributaryError, TributaryResult};
use crate::boundary::{BoundaryReconstructor, SlabOutline};
use crate::geometry::BoundingEnvelope;
use crate::kernel::{default_kernel, GeoKernel, PlanarKernel};
use tracing::{debug, info, warn};

/// Relative mismatch between slab area and summed region area that is
/// reported as a broken partition.
pub const PARTITION_WARN_THRESHOLD: f64 = 1e-6;

/// A configured tributary analysis over a planar kernel.
pub struct TributaryAnalysis<K: PlanarKernel = GeoKernel> {
    kernel: K,
    config: TributaryConfig,
}

impl TributaryAnalysis<GeoKernel> {
    pub fn new(config: TributaryConfig) -> Self {
        Self::with_kernel(default_kernel(), config)
    }
}

impl<K: PlanarKernel> TributaryAnalysis<K> {
    pub fn with_kernel(kernel: K, config: TributaryConfig) -> Self {
        Self { kernel, config }
    }

    pub fn config(&self) -> &TributaryConfig {
        &self.config
    }

    pub fn run(&self, input: &TributaryInput) -> TributaryResult<TributaryReport> {
        let config = &self.config;
        config.validate()?;
        input.validate()?;

        let factor = config.unit_factor();
        let input = input.scaled(factor);
        info!(
            "Tributary run: {} points, {} boundary primitives ({} -> {}, factor {})",
            input.points.len(),
            input.boundaries.len(),
            config.drawing_unit,
            config.working_unit,
            factor
        );

        let outline = BoundaryReconstructor::new(&self.kernel, config).reconstruct(&input.boundaries)?;

        let positions = input.positions();
        let envelope = BoundingEnvelope::around(
            &outline.clip,
            &positions,
            config.envelope_margin,
            config.envelope_relative_margin,
        )
        .ok_or_else(|| TributaryError::InvalidInput("slab outline has no extent".to_string()))?;
        debug!("Envelope: {:?}", envelope);

        let shapes = RegionBuilder::new(
            &self.kernel,
            &outline.clip,
            &positions,
            envelope,
            config.half_plane_tolerance,
        )
        .parallel(config.parallel)
        .build_all()?;

        let regions: Vec<TributaryRegion> = input
            .points
            .iter()
            .zip(shapes)
            .enumerate()
            .map(|(i, (record, shape))| TributaryRegion::new(i, record, shape))
            .collect();

        let ranking = rank_regions(&regions, config.top_k);
        let diagnostics = diagnose(&outline, &regions, &input.points);

        let report = TributaryReport {
            unit: config.working_unit,
            outline,
            envelope,
            regions,
            ranking,
            diagnostics,
        };
        for line in report.summary_lines() {
            info!("{}", line);
        }
        Ok(report)
    }
}

/// Run with the default kernel.
pub fn run(input: &TributaryInput, config: &TributaryConfig) -> TributaryResult<TributaryReport> {
    TributaryAnalysis::new(config.clone()).run(input)
}

fn diagnose(outline: &SlabOutline, regions: &[TributaryRegion], points: &[PointRecord]) -> Diagnostics {
    let slab_area = outline.area();
    let covered_area: f64 = regions.iter().map(|r| r.area).sum();
    let partition_error = if slab_area > 0.0 {
        (covered_area - slab_area).abs() / slab_area
    } else {
        0.0
    };

    let empty_regions: Vec<u64> = regions.iter().filter(|r| r.is_empty()).map(|r| r.point_id).collect();

    let mut coincident_points = Vec::new();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            if a.position() == b.position() {
                coincident_points.push((a.id, b.id));
            }
        }
    }

    let points_outside_slab: Vec<u64> = points
        .iter()
        .filter(|p| !outline.clip.contains(&p.position()))
        .map(|p| p.id)
        .collect();

    if !empty_regions.is_empty() {
        debug!("{} point(s) own no part of the slab: {:?}", empty_regions.len(), empty_regions);
    }
    if !coincident_points.is_empty() {
        warn!("Coincident points share no bisector: {:?}", coincident_points);
    }
    if !points_outside_slab.is_empty() {
        warn!("{} point(s) lie outside the slab: {:?}", points_outside_slab.len(), points_outside_slab);
    }
    if !regions.is_empty() && partition_error > PARTITION_WARN_THRESHOLD {
        warn!(
            "Regions cover {:.6} of slab area {:.6} (relative error {:.3e})",
            covered_area, slab_area, partition_error
        );
    }

    Diagnostics {
        slab_area,
        covered_area,
        partition_error,
        empty_regions,
        coincident_points,
        points_outside_slab,
        discarded_rings: outline.discarded.len(),
    }
}
