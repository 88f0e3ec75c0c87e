//! Summary of a conversion run.

use std::path::PathBuf;

use geo_common::BoundingBox;
use serde::Serialize;

use crate::config::GeoTiffCompression;

/// What a conversion produced, for logging and the optional JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RasterReport {
    /// Samples read from the inputs.
    pub total_samples: usize,
    /// Samples that passed the validity mask.
    pub valid_samples: usize,
    /// Samples rejected by the validity mask.
    pub dropped_samples: usize,
    /// Extent of the valid samples.
    pub extent: BoundingBox,
    pub ncols: usize,
    pub nrows: usize,
    pub resolution_deg: f64,
    /// Cells that received at least one sample.
    pub filled_cells: usize,
    /// Writes that replaced an earlier sample in the same cell.
    pub overwritten: usize,
    /// Samples pulled back onto the grid edge.
    pub clamped: usize,
    pub nodata: f32,
    pub crs: String,
    pub compression: GeoTiffCompression,
    /// Output file, `None` when the raster was only built in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RasterReport {
    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
