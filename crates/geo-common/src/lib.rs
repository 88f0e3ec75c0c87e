//! Common geographic types shared by the rasterizer crates.

pub mod bbox;
pub mod crs;
pub mod grid;
pub mod transform;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use grid::{CellIndex, GridSpec};
pub use transform::GeoTransform;
