//! Test data generators for creating synthetic sample triplets.
//!
//! These generators create predictable, verifiable lon/lat/value arrays
//! that can be used across the test suite.

/// Index-aligned sample arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    pub lon: Vec<f32>,
    pub lat: Vec<f32>,
    pub val: Vec<f32>,
}

impl Samples {
    pub fn push(&mut self, lon: f32, lat: f32, val: f32) {
        self.lon.push(lon);
        self.lat.push(lat);
        self.val.push(val);
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

/// Creates one sample at the centre of every cell of a regular grid.
///
/// Each value is calculated as: `col * 1000 + row`, with row 0 at the
/// northern edge, so a rasterizer run at `res` over the same extent should
/// reproduce `grid[row][col] == col * 1000 + row`.
///
/// # Arguments
///
/// * `ncols` - Number of columns
/// * `nrows` - Number of rows
/// * `west` - Longitude of the western edge
/// * `north` - Latitude of the northern edge
/// * `res` - Cell size in degrees
///
/// # Example
///
/// ```
/// use test_utils::create_cell_center_samples;
///
/// let s = create_cell_center_samples(3, 2, 0.0, 10.0, 1.0);
/// assert_eq!(s.len(), 6);
/// assert_eq!((s.lon[0], s.lat[0], s.val[0]), (0.5, 9.5, 0.0));
/// assert_eq!((s.lon[4], s.lat[4], s.val[4]), (1.5, 8.5, 1001.0));
/// ```
pub fn create_cell_center_samples(
    ncols: usize,
    nrows: usize,
    west: f64,
    north: f64,
    res: f64,
) -> Samples {
    let mut samples = Samples::default();
    for row in 0..nrows {
        for col in 0..ncols {
            let lon = west + (col as f64 + 0.5) * res;
            let lat = north - (row as f64 + 0.5) * res;
            samples.push(lon as f32, lat as f32, (col * 1000 + row) as f32);
        }
    }
    samples
}

/// Creates scattered samples inside a bounding box.
///
/// Positions and values are deterministic for a given `seed`. Values are
/// temperature-like (250K to 310K).
///
/// # Arguments
///
/// * `count` - Number of samples
/// * `bbox` - `(min_lon, min_lat, max_lon, max_lat)`
/// * `seed` - Seed value for deterministic generation
pub fn create_scattered_samples(count: usize, bbox: (f64, f64, f64, f64), seed: u32) -> Samples {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let mut samples = Samples::default();

    for i in 0..count as u32 {
        let fx = unit(simple_hash(i, 0, seed));
        let fy = unit(simple_hash(i, 1, seed));
        let fv = unit(simple_hash(i, 2, seed));

        let lon = min_lon + fx * (max_lon - min_lon);
        let lat = min_lat + fy * (max_lat - min_lat);
        samples.push(lon as f32, lat as f32, (250.0 + fv * 60.0) as f32);
    }
    samples
}

/// Replaces every `every`-th value with `sentinel`, starting at index 0.
pub fn with_sentinel_every(mut samples: Samples, every: usize, sentinel: f32) -> Samples {
    for v in samples.val.iter_mut().step_by(every.max(1)) {
        *v = sentinel;
    }
    samples
}

/// Maps a hash to [0, 1).
fn unit(h: u32) -> f64 {
    h as f64 / (u32::MAX as f64 + 1.0)
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
