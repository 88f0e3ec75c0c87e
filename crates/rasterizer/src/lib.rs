//! Scattered sample to GeoTIFF rasterizer.
//!
//! Turns three index-aligned little-endian `f32` arrays (longitude, latitude,
//! value) into a single-band WGS84 GeoTIFF on a regular grid.
//!
//! # Pipeline
//!
//! ```text
//! lon.bin / lat.bin / val.bin
//!      │
//!      ▼
//! SampleSet::load            (equal lengths enforced)
//!      │
//!      ▼
//! ValidityMask::build        (-180 < lon < 180, -90 < lat < 90, val != -1e31)
//!      │
//!      ▼
//! GridSpec::from_extent      (ceil(range / res) cells, top-left anchor)
//!      │
//!      ▼
//! ScatterGrid::scatter       (truncate to cell, last write wins)
//!      │
//!      ▼
//! GeoTiffWriter::write       (NaN -> nodata, EPSG:4326, GDAL_NODATA)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rasterizer::rasterize;
//!
//! let report = rasterize(
//!     "longitude.bin",
//!     "latitude.bin",
//!     "values.bin",
//!     "output.tif",
//!     1.0 / 64.0,
//! )?;
//! println!("{} x {} grid", report.ncols, report.nrows);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod mask;
pub mod pipeline;
pub mod report;
pub mod samples;
pub mod writer;

// Re-export commonly used types at crate root
pub use config::{GeoTiffCompression, RasterizerConfig, DEFAULT_NODATA, DEFAULT_RESOLUTION_DEG};
pub use error::{RasterizerError, Result};
pub use grid::{Raster, ScatterGrid, ScatterStats};
pub use mask::{is_valid_sample, ValidityMask};
pub use pipeline::{build_raster, rasterize, rasterize_with_config, ConversionPaths};
pub use report::RasterReport;
pub use samples::{load_f32_file, SampleSet};
pub use writer::GeoTiffWriter;

pub use geo_common::{BoundingBox, CrsCode, GeoTransform, GridSpec};
