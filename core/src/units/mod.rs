use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear unit of drawing or working coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    #[default]
    Foot,
}

impl LengthUnit {
    pub fn to_mm(&self, value: f64) -> f64 {
        match self {
            Self::Millimeter => value,
            Self::Centimeter => value * 10.0,
            Self::Meter => value * 1000.0,
            Self::Inch => value * 25.4,
            Self::Foot => value * 304.8,
        }
    }

    pub fn from_mm(&self, mm: f64) -> f64 {
        match self {
            Self::Millimeter => mm,
            Self::Centimeter => mm / 10.0,
            Self::Meter => mm / 1000.0,
            Self::Inch => mm / 25.4,
            Self::Foot => mm / 304.8,
        }
    }

    /// Multiplier converting a length in `self` to a length in `target`.
    pub fn factor_to(&self, target: LengthUnit) -> f64 {
        if *self == target {
            1.0
        } else {
            target.from_mm(self.to_mm(1.0))
        }
    }

    /// Label for areas in this unit, e.g. "sq ft".
    pub fn area_label(&self) -> String {
        format!("sq {}", self)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeter => write!(f, "mm"),
            Self::Centimeter => write!(f, "cm"),
            Self::Meter => write!(f, "m"),
            Self::Inch => write!(f, "in"),
            Self::Foot => write!(f, "ft"),
        }
    }
}
