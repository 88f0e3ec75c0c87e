//! Coordinate Reference System codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CRS codes a raster can be tagged with.
///
/// Output is always geographic lat/lon; reprojection is out of scope, so the
/// only supported code is WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    #[default]
    Epsg4326,
}

impl CrsCode {
    /// Numeric EPSG code, as stored in the GeoTIFF key directory.
    pub fn epsg(&self) -> u16 {
        match self {
            CrsCode::Epsg4326 => 4326,
        }
    }

    /// Human readable citation written alongside the EPSG code.
    pub fn citation(&self) -> &'static str {
        match self {
            CrsCode::Epsg4326 => "WGS 84",
        }
    }

    /// Valid coordinate range `(min_x, min_y, max_x, max_y)` for this CRS.
    pub fn valid_bounds(&self) -> crate::BoundingBox {
        match self {
            CrsCode::Epsg4326 => crate::BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}
