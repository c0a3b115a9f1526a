pub mod boundary;
pub mod geometry;
pub mod kernel;
pub mod tributary;
pub mod units;

pub use tributary::{run, TributaryConfig, TributaryError, TributaryInput, TributaryReport};

pub fn version() -> &'static str {
    "0.1.0"
}
