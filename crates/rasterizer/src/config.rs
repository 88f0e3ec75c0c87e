//! Configuration for the rasterizer.

use serde::{Deserialize, Serialize};

use crate::error::{RasterizerError, Result};

/// Default cell size: 1/64 degree, about 1.7 km at the equator.
pub const DEFAULT_RESOLUTION_DEG: f64 = 1.0 / 64.0;

/// Value written to cells that received no sample.
pub const DEFAULT_NODATA: f32 = -9999.0;

/// Input value meaning "no measurement".
pub const DEFAULT_INPUT_SENTINEL: f32 = -1.0e31;

/// Configuration for a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterizerConfig {
    /// Grid cell size in degrees.
    pub resolution_deg: f64,

    /// No-data value declared in and written to the output raster.
    pub nodata: f32,

    /// Input values equal to this are dropped.
    pub input_sentinel: f32,

    /// Compression codec for the GeoTIFF strip data.
    pub compression: GeoTiffCompression,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            resolution_deg: DEFAULT_RESOLUTION_DEG,
            nodata: DEFAULT_NODATA,
            input_sentinel: DEFAULT_INPUT_SENTINEL,
            compression: GeoTiffCompression::None,
        }
    }
}

impl RasterizerConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RASTER_RESOLUTION_DEG") {
            if let Ok(res) = val.parse() {
                config.resolution_deg = res;
            }
        }

        if let Ok(val) = std::env::var("RASTER_NODATA") {
            if let Ok(nodata) = val.parse() {
                config.nodata = nodata;
            }
        }

        if let Ok(val) = std::env::var("RASTER_INPUT_SENTINEL") {
            if let Ok(sentinel) = val.parse() {
                config.input_sentinel = sentinel;
            }
        }

        if let Ok(val) = std::env::var("RASTER_COMPRESSION") {
            config.compression = GeoTiffCompression::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution_deg.is_finite() || self.resolution_deg <= 0.0 {
            return Err(RasterizerError::InvalidResolution(self.resolution_deg));
        }

        if !self.nodata.is_finite() {
            return Err(RasterizerError::config("nodata must be a finite value"));
        }

        Ok(())
    }
}

/// Compression codec for GeoTIFF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoTiffCompression {
    /// Uncompressed strips.
    #[default]
    None,
    /// LZW.
    Lzw,
    /// Deflate (zlib).
    Deflate,
}

impl GeoTiffCompression {
    /// Parse from string (case-insensitive). Unknown names mean no compression.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lzw" => Self::Lzw,
            "deflate" | "zlib" => Self::Deflate,
            _ => Self::None,
        }
    }

    /// Get the codec name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lzw => "lzw",
            Self::Deflate => "deflate",
        }
    }
}

impl std::fmt::Display for GeoTiffCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RasterizerConfig::default();
        assert_eq!(config.resolution_deg, 0.015625);
        assert_eq!(config.nodata, -9999.0);
        assert_eq!(config.input_sentinel, -1.0e31);
        assert_eq!(config.compression, GeoTiffCompression::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_resolution() {
        for res in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = RasterizerConfig {
                resolution_deg: res,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(RasterizerError::InvalidResolution(_))
            ));
        }
    }

    #[test]
    fn test_compression_from_str() {
        assert_eq!(GeoTiffCompression::from_str("LZW"), GeoTiffCompression::Lzw);
        assert_eq!(GeoTiffCompression::from_str("deflate"), GeoTiffCompression::Deflate);
        assert_eq!(GeoTiffCompression::from_str("bogus"), GeoTiffCompression::None);
        assert_eq!(GeoTiffCompression::Lzw.to_string(), "lzw");
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_value(RasterizerConfig::default()).unwrap();
        assert_eq!(json["compression"], "none");
    }
}
