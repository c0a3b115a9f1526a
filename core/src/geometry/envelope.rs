//! Padded bounding rectangle used to bound bisector half-planes.

use super::{Point2, Shape};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingEnvelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingEnvelope {
    /// Envelope around the slab and every point, padded outward.
    ///
    /// The padding is the larger of `margin` and `relative_margin` times the
    /// diagonal of the unpadded bounds. Every point ends up strictly inside,
    /// so a point's own half-plane always overlaps the envelope.
    /// Returns `None` when there is nothing to bound.
    pub fn around(slab: &Shape, points: &[Point2], margin: f64, relative_margin: f64) -> Option<Self> {
        let mut env = match slab.bounds() {
            Some((min, max)) => Self::from_corners(min, max),
            None => {
                let first = points.first()?;
                Self::from_corners(*first, *first)
            }
        };
        for p in points {
            env.include(p);
        }

        let diagonal = (env.width().powi(2) + env.height().powi(2)).sqrt();
        let pad = margin.max(relative_margin * diagonal).max(f64::EPSILON);
        Some(env.padded(pad))
    }

    pub fn from_corners(min: Point2, max: Point2) -> Self {
        Self {
            min_x: min.x,
            max_x: max.x,
            min_y: min.y,
            max_y: max.y,
        }
    }

    pub fn include(&mut self, p: &Point2) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn padded(&self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            max_x: self.max_x + pad,
            min_y: self.min_y - pad,
            max_y: self.max_y + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Larger side length; used to scale numeric tolerances.
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }

    /// Corners in counter-clockwise order starting at (min_x, min_y).
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x, self.min_y),
            Point2::new(self.max_x, self.min_y),
            Point2::new(self.max_x, self.max_y),
            Point2::new(self.min_x, self.max_y),
        ]
    }

    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}
