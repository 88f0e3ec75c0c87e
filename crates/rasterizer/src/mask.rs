//! Validity filtering of raw samples.

use geo_common::CrsCode;

use crate::samples::SampleSet;

/// Per-sample keep/drop flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask {
    keep: Vec<bool>,
}

/// True when a sample lies strictly inside the WGS84 domain and carries a
/// measurement.
///
/// Bounds are exclusive: a longitude of exactly +/-180 or a latitude of
/// exactly +/-90 is dropped. NaN coordinates fail every comparison and are
/// dropped; a NaN value is kept (it is not the sentinel).
pub fn is_valid_sample(lon: f32, lat: f32, val: f32, sentinel: f32) -> bool {
    let domain = CrsCode::Epsg4326.valid_bounds();
    let (lon, lat) = (lon as f64, lat as f64);

    lon > domain.min_x
        && lon < domain.max_x
        && lat > domain.min_y
        && lat < domain.max_y
        && val != sentinel
}

impl ValidityMask {
    /// Evaluate every sample against the domain bounds and `sentinel`.
    pub fn build(samples: &SampleSet, sentinel: f32) -> Self {
        let keep = samples
            .iter()
            .map(|(lon, lat, val)| is_valid_sample(lon, lat, val, sentinel))
            .collect();
        Self { keep }
    }

    pub fn len(&self) -> usize {
        self.keep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Number of samples that survive.
    pub fn count_valid(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, bool> {
        self.keep.iter()
    }
}
