//! Common test fixtures for rasterizer tests.
//!
//! This module provides pre-defined sample sets that represent common
//! conversion scenarios.

/// Input value meaning "no measurement".
pub const INPUT_SENTINEL: f32 = -1.0e31;

/// No-data value written to empty output cells.
pub const OUTPUT_NODATA: f32 = -9999.0;

/// Default grid resolution, 1/64 degree.
pub const DEFAULT_RES: f64 = 1.0 / 64.0;

/// Named sample sets as `(lon, lat, val)` arrays.
pub mod scenarios {
    use super::INPUT_SENTINEL;

    /// Two samples on the same latitude, one column apart at 1/64 degree.
    /// Expected output: a 1 x 2 grid `[5.0, 7.0]`.
    pub const TWO_COLUMNS: ([f32; 2], [f32; 2], [f32; 2]) =
        ([10.0, 10.02], [50.0, 50.0], [5.0, 7.0]);

    /// Every value is the input sentinel.
    pub const ALL_SENTINEL: ([f32; 3], [f32; 3], [f32; 3]) = (
        [1.0, 2.0, 3.0],
        [1.0, 2.0, 3.0],
        [INPUT_SENTINEL, INPUT_SENTINEL, INPUT_SENTINEL],
    );

    /// Samples outside the WGS84 domain or on its edges.
    pub const OUT_OF_DOMAIN: ([f32; 4], [f32; 4], [f32; 4]) = (
        [180.0, -180.0, 0.0, 250.0],
        [0.0, 0.0, 90.0, 0.0],
        [1.0, 2.0, 3.0, 4.0],
    );
}
