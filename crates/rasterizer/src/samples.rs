//! Loading of raw sample arrays.

use std::path::Path;

use geo_common::BoundingBox;
use tracing::debug;

use crate::error::{RasterizerError, Result};
use crate::mask::ValidityMask;

/// Read a headerless little-endian f32 array.
///
/// The element count is `file size / 4`; a trailing partial value is an error.
pub fn load_f32_file(path: impl AsRef<Path>) -> Result<Vec<f32>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| RasterizerError::io(path, e))?;

    if bytes.len() % 4 != 0 {
        return Err(RasterizerError::MalformedInput {
            path: path.to_path_buf(),
            len: bytes.len() as u64,
        });
    }

    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    debug!(path = %path.display(), count = values.len(), "Loaded f32 array");
    Ok(values)
}

/// Index-aligned longitude, latitude and value arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    pub lon: Vec<f32>,
    pub lat: Vec<f32>,
    pub val: Vec<f32>,
}

impl SampleSet {
    /// Wrap three arrays, checking they have the same length.
    pub fn new(lon: Vec<f32>, lat: Vec<f32>, val: Vec<f32>) -> Result<Self> {
        if lon.len() != lat.len() || lon.len() != val.len() {
            return Err(RasterizerError::ShapeMismatch {
                lon: lon.len(),
                lat: lat.len(),
                val: val.len(),
            });
        }
        Ok(Self { lon, lat, val })
    }

    /// Load the three arrays from disk.
    pub fn load(
        lon_path: impl AsRef<Path>,
        lat_path: impl AsRef<Path>,
        val_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let lon = load_f32_file(lon_path)?;
        let lat = load_f32_file(lat_path)?;
        let val = load_f32_file(val_path)?;
        Self::new(lon, lat, val)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// Keep the samples selected by `mask`, in their original order.
    pub fn filtered(&self, mask: &ValidityMask) -> Self {
        let capacity = mask.count_valid();
        let mut out = Self {
            lon: Vec::with_capacity(capacity),
            lat: Vec::with_capacity(capacity),
            val: Vec::with_capacity(capacity),
        };

        for (i, _) in mask.iter().enumerate().filter(|&(_, &keep)| keep) {
            out.lon.push(self.lon[i]);
            out.lat.push(self.lat[i]);
            out.val.push(self.val[i]);
        }
        out
    }

    /// Extent of the sample coordinates.
    pub fn extent(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.lon, &self.lat)
    }

    /// Iterate `(lon, lat, val)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        self.lon
            .iter()
            .zip(&self.lat)
            .zip(&self.val)
            .map(|((&lon, &lat), &val)| (lon, lat, val))
    }
}
