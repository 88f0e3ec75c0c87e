//! Regular lat/lon grid specification derived from a sample extent.

use crate::{BoundingBox, GeoTransform};
use serde::{Deserialize, Serialize};

/// A uniform grid covering a bounding box at a fixed resolution.
///
/// Row 0 is the northern edge (`bbox.max_y`), column 0 the western edge
/// (`bbox.min_x`). Cells are `resolution` degrees square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of columns (longitude direction)
    pub ncols: usize,
    /// Number of rows (latitude direction)
    pub nrows: usize,
    /// Cell size in degrees
    pub resolution: f64,
    /// Extent the grid was derived from
    pub bbox: BoundingBox,
}

/// Position of a sample on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
    /// The raw index fell outside the grid and was pulled back to the edge.
    pub clamped: bool,
}

impl GridSpec {
    /// Size a grid to cover `bbox` at `resolution`.
    ///
    /// `ncols = ceil(width / resolution)` and `nrows = ceil(height / resolution)`,
    /// each at least 1 so a single point or a line still gets a cell.
    pub fn from_extent(bbox: BoundingBox, resolution: f64) -> Self {
        let ncols = ((bbox.width() / resolution).ceil() as usize).max(1);
        let nrows = ((bbox.height() / resolution).ceil() as usize).max(1);
        Self {
            ncols,
            nrows,
            resolution,
            bbox,
        }
    }

    /// Transform anchored at the top-left corner `(min_x, max_y)`.
    pub fn transform(&self) -> GeoTransform {
        GeoTransform::from_origin(
            self.bbox.min_x,
            self.bbox.max_y,
            self.resolution,
            self.resolution,
        )
    }

    /// Grid cell for a coordinate.
    ///
    /// Indices are truncated, not rounded. A sample lying exactly on the
    /// eastern or southern edge would land one past the last cell when the
    /// extent is a whole number of cells, so indices are clamped to the grid.
    pub fn cell_index(&self, x: f64, y: f64) -> CellIndex {
        let col = ((x - self.bbox.min_x) / self.resolution) as i64;
        let row = ((self.bbox.max_y - y) / self.resolution) as i64;

        let max_col = self.ncols as i64 - 1;
        let max_row = self.nrows as i64 - 1;
        let clamped_col = col.clamp(0, max_col);
        let clamped_row = row.clamp(0, max_row);

        CellIndex {
            row: clamped_row as usize,
            col: clamped_col as usize,
            clamped: clamped_col != col || clamped_row != row,
        }
    }

    /// Row-major offset of a cell.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.ncols + col
    }

    /// Total number of cells, or `None` on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        self.nrows.checked_mul(self.ncols)
    }
}
