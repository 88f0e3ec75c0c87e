//! Dense grid that samples are scattered into.

use geo_common::{CrsCode, GeoTransform, GridSpec};
use serde::Serialize;
use tracing::debug;

use crate::error::{RasterizerError, Result};
use crate::samples::SampleSet;

/// Counters collected while scattering samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScatterStats {
    /// Samples written to the grid.
    pub written: usize,
    /// Writes that replaced a value already in the cell.
    pub overwritten: usize,
    /// Samples whose index fell off the grid edge and was clamped.
    pub clamped: usize,
}

/// In-memory grid, NaN where no sample landed.
#[derive(Debug, Clone)]
pub struct ScatterGrid {
    spec: GridSpec,
    data: Vec<f32>,
}

impl ScatterGrid {
    /// Allocate a NaN-filled grid for `spec`.
    ///
    /// Allocation is fallible: a grid too large for memory is reported as
    /// `OutOfMemory` rather than aborting the process.
    pub fn new(spec: GridSpec) -> Result<Self> {
        let oom = || RasterizerError::OutOfMemory {
            nrows: spec.nrows,
            ncols: spec.ncols,
        };
        let cells = spec.cell_count().ok_or_else(oom)?;

        let mut data = Vec::new();
        data.try_reserve_exact(cells).map_err(|_| oom())?;
        data.resize(cells, f32::NAN);

        debug!(nrows = spec.nrows, ncols = spec.ncols, "Allocated grid");
        Ok(Self { spec, data })
    }

    /// Assign every sample to its cell, in order.
    ///
    /// Colliding samples are not combined: the last one written wins.
    /// A cell holding NaN counts as empty for the `overwritten` counter.
    pub fn scatter(&mut self, samples: &SampleSet) -> ScatterStats {
        let mut stats = ScatterStats::default();

        for (lon, lat, val) in samples.iter() {
            let cell = self.spec.cell_index(lon as f64, lat as f64);
            let idx = self.spec.flat_index(cell.row, cell.col);

            if cell.clamped {
                stats.clamped += 1;
            }
            if !self.data[idx].is_nan() {
                stats.overwritten += 1;
            }
            self.data[idx] = val;
            stats.written += 1;
        }

        stats
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Value at a cell, `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.spec.nrows || col >= self.spec.ncols {
            return None;
        }
        Some(self.data[self.spec.flat_index(row, col)])
    }

    /// Number of cells holding a value.
    pub fn filled_cells(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }

    /// Convert to the on-disk representation.
    ///
    /// NaN becomes `nodata`; infinities are pinned to the largest finite f32
    /// of the same sign.
    pub fn into_raster(self, nodata: f32) -> Raster {
        let transform = self.spec.transform();
        let data = self
            .data
            .into_iter()
            .map(|v| {
                if v.is_nan() {
                    nodata
                } else if v == f32::INFINITY {
                    f32::MAX
                } else if v == f32::NEG_INFINITY {
                    f32::MIN
                } else {
                    v
                }
            })
            .collect();

        Raster {
            data,
            width: self.spec.ncols,
            height: self.spec.nrows,
            transform,
            crs: CrsCode::Epsg4326,
            nodata,
        }
    }
}

/// Single-band georeferenced raster ready to be encoded.
#[derive(Debug, Clone)]
pub struct Raster {
    /// Row-major pixel values, north row first.
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub transform: GeoTransform,
    pub crs: CrsCode,
    pub nodata: f32,
}

impl Raster {
    /// Value at a pixel, `None` outside the raster.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }
}
