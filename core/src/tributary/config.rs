use super::{TributaryError, TributaryResult};
use crate::units::LengthUnit;
use serde::{Deserialize, Serialize};

/// Tunable parameters for a tributary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TributaryConfig {
    /// Minimum padding (working units) between the slab/points and the
    /// envelope that bounds bisector half-planes
    pub envelope_margin: f64,
    /// Padding as a fraction of the slab diagonal; the larger padding wins
    pub envelope_relative_margin: f64,
    /// Inclusion tolerance for the bisector test, relative to the envelope extent
    pub half_plane_tolerance: f64,
    /// Outward expansion of the reconstructed outline (working units); 0 disables it
    pub closing_tolerance: f64,
    /// Endpoints closer than this are merged when rebuilding the outline
    pub snap_tolerance: f64,
    /// Edges per full turn when discretizing circles and arcs
    pub curve_segments: usize,
    /// Number of regions reported in the ranking
    pub top_k: usize,
    /// Build regions on the rayon thread pool
    pub parallel: bool,
    /// Unit of incoming coordinates
    pub drawing_unit: LengthUnit,
    /// Unit all computation and reporting happens in
    pub working_unit: LengthUnit,
}

impl Default for TributaryConfig {
    fn default() -> Self {
        Self {
            envelope_margin: 5.0,
            envelope_relative_margin: 0.05,
            half_plane_tolerance: 1e-9,
            closing_tolerance: 0.006,
            snap_tolerance: 1e-4,
            curve_segments: 64,
            top_k: 12,
            parallel: true,
            drawing_unit: LengthUnit::Foot,
            working_unit: LengthUnit::Foot,
        }
    }
}

impl TributaryConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_units(mut self, drawing_unit: LengthUnit, working_unit: LengthUnit) -> Self {
        self.drawing_unit = drawing_unit;
        self.working_unit = working_unit;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Factor converting drawing coordinates to working coordinates.
    pub fn unit_factor(&self) -> f64 {
        self.drawing_unit.factor_to(self.working_unit)
    }

    pub fn validate(&self) -> TributaryResult<()> {
        let non_negative = [
            ("envelope_margin", self.envelope_margin),
            ("envelope_relative_margin", self.envelope_relative_margin),
            ("half_plane_tolerance", self.half_plane_tolerance),
            ("closing_tolerance", self.closing_tolerance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TributaryError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.snap_tolerance.is_finite() || self.snap_tolerance <= 0.0 {
            return Err(TributaryError::InvalidConfig(format!(
                "snap_tolerance must be positive, got {}",
                self.snap_tolerance
            )));
        }
        if self.curve_segments < 3 {
            return Err(TributaryError::InvalidConfig(format!(
                "curve_segments must be at least 3, got {}",
                self.curve_segments
            )));
        }
        Ok(())
    }
}
