//! Scratch locations and `.bin` fixture files for tests.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("bin2tif_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Writes values as a headerless little-endian f32 file.
pub fn write_f32_bin(path: &Path, values: &[f32]) -> PathBuf {
    let mut file = std::fs::File::create(path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {}", path.display(), e));
    for v in values {
        file.write_all(&v.to_le_bytes())
            .expect("Failed to write f32 value");
    }
    path.to_path_buf()
}

/// Paths of a lon/lat/val triplet plus the output raster, all inside one
/// temporary directory.
pub struct SampleFiles {
    pub dir: tempfile::TempDir,
    pub lon: PathBuf,
    pub lat: PathBuf,
    pub val: PathBuf,
    pub out: PathBuf,
}

/// Writes `longitude.bin`, `latitude.bin` and `values.bin` into a fresh
/// temporary directory. The output path `output.tif` is not created.
pub fn write_sample_files(lon: &[f32], lat: &[f32], val: &[f32]) -> SampleFiles {
    let dir = temp_test_dir();
    let lon_path = write_f32_bin(&dir.path().join("longitude.bin"), lon);
    let lat_path = write_f32_bin(&dir.path().join("latitude.bin"), lat);
    let val_path = write_f32_bin(&dir.path().join("values.bin"), val);
    let out = dir.path().join("output.tif");

    SampleFiles {
        dir,
        lon: lon_path,
        lat: lat_path,
        val: val_path,
        out,
    }
}
