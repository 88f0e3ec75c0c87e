//! End-to-end conversion: load, filter, grid, scatter, write.

use std::path::{Path, PathBuf};

use geo_common::GridSpec;
use tracing::{debug, info};

use crate::config::RasterizerConfig;
use crate::error::{RasterizerError, Result};
use crate::grid::{Raster, ScatterGrid};
use crate::mask::ValidityMask;
use crate::report::RasterReport;
use crate::samples::SampleSet;

/// Input and output locations for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPaths {
    pub lon: PathBuf,
    pub lat: PathBuf,
    pub val: PathBuf,
    pub out: PathBuf,
}

impl ConversionPaths {
    pub fn new(
        lon: impl Into<PathBuf>,
        lat: impl Into<PathBuf>,
        val: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lon: lon.into(),
            lat: lat.into(),
            val: val.into(),
            out: out.into(),
        }
    }
}

/// Convert three `.bin` sample files into a GeoTIFF at `out_path`.
///
/// Uses the default no-data value, sentinel and compression; see
/// [`rasterize_with_config`] to change them.
pub fn rasterize(
    lon_path: impl AsRef<Path>,
    lat_path: impl AsRef<Path>,
    val_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
    resolution_degrees: f64,
) -> Result<RasterReport> {
    let paths = ConversionPaths::new(
        lon_path.as_ref(),
        lat_path.as_ref(),
        val_path.as_ref(),
        out_path.as_ref(),
    );
    let config = RasterizerConfig {
        resolution_deg: resolution_degrees,
        ..Default::default()
    };
    rasterize_with_config(&paths, &config)
}

/// Convert sample files into a GeoTIFF using `config`.
///
/// Nothing is written unless every input check passes.
pub fn rasterize_with_config(
    paths: &ConversionPaths,
    config: &RasterizerConfig,
) -> Result<RasterReport> {
    config.validate()?;

    let samples = SampleSet::load(&paths.lon, &paths.lat, &paths.val)?;
    info!(
        samples = samples.len(),
        lon = %paths.lon.display(),
        lat = %paths.lat.display(),
        val = %paths.val.display(),
        "Loaded sample arrays"
    );

    let (raster, mut report) = grid_samples(&samples, config)?;

    raster
        .geotiff_writer()
        .compression(config.compression)
        .write(&paths.out)?;

    info!(
        path = %paths.out.display(),
        width = raster.width,
        height = raster.height,
        "Wrote GeoTIFF"
    );

    report.output = Some(paths.out.clone());
    Ok(report)
}

/// Filter, grid and scatter samples in memory.
///
/// `config` is validated first, so this can be called on its own.
pub fn build_raster(
    samples: &SampleSet,
    config: &RasterizerConfig,
) -> Result<(Raster, RasterReport)> {
    config.validate()?;
    grid_samples(samples, config)
}

/// Body of [`build_raster`] for callers that already validated `config`.
fn grid_samples(samples: &SampleSet, config: &RasterizerConfig) -> Result<(Raster, RasterReport)> {
    let mask = ValidityMask::build(samples, config.input_sentinel);
    let valid = samples.filtered(&mask);
    let dropped = samples.len() - valid.len();

    info!(valid = valid.len(), dropped, "Applied validity mask");

    if valid.is_empty() {
        return Err(RasterizerError::NoValidSamples {
            total: samples.len(),
        });
    }

    let extent = valid.extent().ok_or(RasterizerError::NoValidSamples {
        total: samples.len(),
    })?;
    let spec = GridSpec::from_extent(extent, config.resolution_deg);
    info!(
        min_lon = extent.min_x,
        max_lon = extent.max_x,
        min_lat = extent.min_y,
        max_lat = extent.max_y,
        ncols = spec.ncols,
        nrows = spec.nrows,
        resolution = config.resolution_deg,
        "Computed grid"
    );

    let mut grid = ScatterGrid::new(spec)?;
    let stats = grid.scatter(&valid);
    let filled_cells = grid.filled_cells();
    debug!(
        written = stats.written,
        overwritten = stats.overwritten,
        clamped = stats.clamped,
        filled_cells,
        "Scattered samples"
    );

    let raster = grid.into_raster(config.nodata);
    let report = RasterReport {
        total_samples: samples.len(),
        valid_samples: valid.len(),
        dropped_samples: dropped,
        extent,
        ncols: spec.ncols,
        nrows: spec.nrows,
        resolution_deg: config.resolution_deg,
        filled_cells,
        overwritten: stats.overwritten,
        clamped: stats.clamped,
        nodata: config.nodata,
        crs: raster.crs.to_string(),
        compression: config.compression,
        output: None,
    };

    Ok((raster, report))
}
