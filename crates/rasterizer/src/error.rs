//! Error types for rasterization.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while converting samples to a raster.
#[derive(Error, Debug)]
pub enum RasterizerError {
    /// An input could not be read or the output could not be written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on a caller-supplied writer, with no file path to report.
    #[error("I/O error: {0}")]
    Stream(#[source] std::io::Error),

    /// An input file is not a whole number of little-endian f32 values.
    #[error("malformed input {path}: {len} bytes is not a multiple of 4")]
    MalformedInput { path: PathBuf, len: u64 },

    /// The three sample arrays have different lengths.
    #[error("sample arrays differ in length: lon={lon}, lat={lat}, val={val}")]
    ShapeMismatch { lon: usize, lat: usize, val: usize },

    /// Resolution is not a finite positive number.
    #[error("invalid resolution {0}: must be a finite value > 0")]
    InvalidResolution(f64),

    /// Every sample was rejected by the validity mask.
    #[error("no valid samples out of {total}")]
    NoValidSamples { total: usize },

    /// The output grid could not be allocated.
    #[error("cannot allocate a {nrows} x {ncols} grid")]
    OutOfMemory { nrows: usize, ncols: usize },

    /// The output grid exceeds what a TIFF can address.
    #[error("grid of {nrows} x {ncols} exceeds the TIFF dimension limit")]
    GridTooLarge { nrows: usize, ncols: usize },

    /// TIFF encoder failure.
    #[error("GeoTIFF encoding error: {0}")]
    Encode(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RasterizerError {
    /// Create an Io error tagged with the offending path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Turn a path-less `Stream` error into `Io` on `path`.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Self::Stream(source) => Self::io(path, source),
            other => other,
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<tiff::TiffError> for RasterizerError {
    fn from(err: tiff::TiffError) -> Self {
        match err {
            tiff::TiffError::IoError(e) => Self::Stream(e),
            other => Self::Encode(other.to_string()),
        }
    }
}

/// Result type for rasterizer operations.
pub type Result<T> = std::result::Result<T, RasterizerError>;
