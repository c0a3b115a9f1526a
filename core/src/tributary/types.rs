//! Input records and report types of a tributary run.

use super::{TributaryError, TributaryResult};
use crate::boundary::{BoundaryRecord, SlabOutline};
use crate::geometry::{BoundingEnvelope, Point2, Shape};
use crate::units::LengthUnit;
use serde::{Deserialize, Serialize};

/// A column location `{id, x, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl PointRecord {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Everything a run consumes: column points and slab boundary primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TributaryInput {
    #[serde(default)]
    pub points: Vec<PointRecord>,
    #[serde(default)]
    pub boundaries: Vec<BoundaryRecord>,
}

impl TributaryInput {
    pub fn new(points: Vec<PointRecord>, boundaries: Vec<BoundaryRecord>) -> Self {
        Self { points, boundaries }
    }

    pub fn from_json(json: &str) -> TributaryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject non-finite coordinates, radii and angles.
    pub fn validate(&self) -> TributaryResult<()> {
        if let Some(p) = self.points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(TributaryError::InvalidInput(format!(
                "point {} has a non-finite coordinate ({}, {})",
                p.id, p.x, p.y
            )));
        }
        if let Some(b) = self.boundaries.iter().find(|b| !b.geometry.is_finite()) {
            return Err(TributaryError::InvalidInput(format!(
                "boundary primitive {} has a non-finite value",
                b.id
            )));
        }
        Ok(())
    }

    /// Copy with every length multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        if factor == 1.0 {
            return self.clone();
        }
        Self {
            points: self
                .points
                .iter()
                .map(|p| PointRecord::new(p.id, p.x * factor, p.y * factor))
                .collect(),
            boundaries: self
                .boundaries
                .iter()
                .map(|b| BoundaryRecord::new(b.id, b.geometry.scaled(factor)))
                .collect(),
        }
    }

    pub fn positions(&self) -> Vec<Point2> {
        self.points.iter().map(PointRecord::position).collect()
    }
}

/// The part of the slab owned by one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TributaryRegion {
    /// Index of the owning point in the input sequence
    pub owner: usize,
    pub point_id: u64,
    pub point: Point2,
    pub shape: Shape,
    pub area: f64,
    pub centroid: Option<Point2>,
}

impl TributaryRegion {
    pub fn new(owner: usize, record: &PointRecord, shape: Shape) -> Self {
        let area = shape.area();
        let centroid = shape.centroid();
        Self {
            owner,
            point_id: record.id,
            point: record.position(),
            shape,
            area,
            centroid,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }
}

/// One row of the top-K ranking. Rank 1 is the largest area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub owner: usize,
    pub point_id: u64,
    pub point: Point2,
    pub area: f64,
    pub centroid: Option<Point2>,
    pub shape: Shape,
}

/// Consistency checks of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub slab_area: f64,
    /// Sum of all region areas
    pub covered_area: f64,
    /// |covered - slab| / slab
    pub partition_error: f64,
    /// Point ids whose region is empty
    pub empty_regions: Vec<u64>,
    /// Pairs of point ids at the same location
    pub coincident_points: Vec<(u64, u64)>,
    /// Point ids lying outside the slab outline
    pub points_outside_slab: Vec<u64>,
    /// Closed rings ignored in favour of the outline
    pub discarded_rings: usize,
}

/// Complete result of a tributary run, in working units.
#[derive(Debug, Clone, Serialize)]
pub struct TributaryReport {
    pub unit: LengthUnit,
    pub outline: SlabOutline,
    pub envelope: BoundingEnvelope,
    /// One region per input point, in input order
    pub regions: Vec<TributaryRegion>,
    pub ranking: Vec<RankedEntry>,
    pub diagnostics: Diagnostics,
}

impl TributaryReport {
    /// Human-readable ranking, one line per entry after a header.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.ranking.len() + 1);
        lines.push(format!("Largest {} tributary areas:", self.ranking.len()));
        for entry in &self.ranking {
            lines.push(format!(
                "{}. Column {} at ({:.2}, {:.2}): {:.2} {}",
                entry.rank,
                entry.owner,
                entry.point.x,
                entry.point.y,
                entry.area,
                self.unit.area_label()
            ));
        }
        lines
    }
}
