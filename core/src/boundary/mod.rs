pub mod types;
pub mod graph;
pub mod reconstruct;

#[cfg(test)]
mod tests_reconstruct;

pub use reconstruct::{select_outline, BoundaryReconstructor, SlabOutline};
pub use types::{BoundaryGeometry, BoundaryRecord};
