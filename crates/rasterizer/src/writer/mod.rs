//! Raster file writers.

pub mod geotiff;

pub use geotiff::GeoTiffWriter;
