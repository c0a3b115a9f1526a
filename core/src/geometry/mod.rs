use nalgebra as na;

pub type Point2 = na::Point2<f64>;
pub type Vector2 = na::Vector2<f64>;

pub const EPSILON: f64 = 1e-6;

pub mod utils_2d;

pub mod polygon;
pub use polygon::{Polygon, Segment, Shape};

pub mod envelope;
pub use envelope::BoundingEnvelope;
