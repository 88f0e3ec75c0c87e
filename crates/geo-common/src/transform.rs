//! Affine georeferencing transform.

use serde::{Deserialize, Serialize};

/// North-up affine transform between pixel space and map coordinates.
///
/// Pixel `(row, col)` has its top-left corner at
/// `(origin_x + col * pixel_width, origin_y + row * pixel_height)`.
/// `pixel_height` is negative for north-up rasters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Build a transform from the top-left corner and positive pixel sizes.
    ///
    /// The y step is stored negated, so rows increase southward.
    pub fn from_origin(west: f64, north: f64, xsize: f64, ysize: f64) -> Self {
        Self {
            origin_x: west,
            origin_y: north,
            pixel_width: xsize,
            pixel_height: -ysize,
        }
    }

    /// GeoTIFF ModelPixelScale `[sx, sy, sz]`; both scales positive.
    pub fn pixel_scale(&self) -> [f64; 3] {
        [self.pixel_width.abs(), self.pixel_height.abs(), 0.0]
    }

    /// GeoTIFF ModelTiepoint tying raster `(0, 0)` to the origin.
    pub fn tiepoint(&self) -> [f64; 6] {
        [0.0, 0.0, 0.0, self.origin_x, self.origin_y, 0.0]
    }

    /// Rebuild a transform from GeoTIFF pixel scale and tiepoint tags.
    pub fn from_geotiff_tags(pixel_scale: &[f64], tiepoint: &[f64]) -> Option<Self> {
        if pixel_scale.len() < 2 || tiepoint.len() < 6 {
            return None;
        }
        let (i, j) = (tiepoint[0], tiepoint[1]);
        let west = tiepoint[3] - i * pixel_scale[0];
        let north = tiepoint[4] + j * pixel_scale[1];
        Some(Self::from_origin(west, north, pixel_scale[0], pixel_scale[1]))
    }
}
