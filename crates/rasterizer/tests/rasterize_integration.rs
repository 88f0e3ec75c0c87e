//! Integration tests: write `.bin` triplets, convert them, read the GeoTIFF back.

use std::path::Path;

use rasterizer::{
    rasterize, rasterize_with_config, ConversionPaths, GeoTiffCompression, GeoTransform,
    RasterizerConfig, RasterizerError,
};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, create_cell_center_samples,
    create_scattered_samples, scenarios, with_sentinel_every, write_f32_bin, write_sample_files,
    DEFAULT_RES, INPUT_SENTINEL, OUTPUT_NODATA,
};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

struct DecodedRaster {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
    transform: GeoTransform,
    epsg: u16,
    nodata: String,
}

fn read_geotiff(path: &Path) -> DecodedRaster {
    let file = std::fs::File::open(path).expect("output should exist");
    let mut decoder = Decoder::new(std::io::BufReader::new(file)).unwrap();

    let (width, height) = decoder.dimensions().unwrap();
    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).unwrap();
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).unwrap();
    let geokeys = decoder
        .get_tag_u16_vec(Tag::from_u16_exhaustive(34735))
        .unwrap();
    let nodata = decoder
        .get_tag_ascii_string(Tag::from_u16_exhaustive(42113))
        .unwrap();

    // GeographicTypeGeoKey (2048) value
    let epsg = geokeys[4..]
        .chunks(4)
        .find(|k| k[0] == 2048)
        .map(|k| k[3])
        .unwrap_or(0);

    let pixels = match decoder.read_image().unwrap() {
        DecodingResult::F32(p) => p,
        _ => panic!("expected f32 samples"),
    };

    DecodedRaster {
        width: width as usize,
        height: height as usize,
        pixels,
        transform: GeoTransform::from_geotiff_tags(&scale, &tiepoint).unwrap(),
        epsg,
        nodata: nodata.trim_end_matches('\0').to_string(),
    }
}

#[test]
fn test_two_samples_fill_two_columns() {
    let (lon, lat, val) = scenarios::TWO_COLUMNS;
    let files = write_sample_files(&lon, &lat, &val);

    let report = rasterize(&files.lon, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap();
    assert_eq!(report.ncols, 2);
    assert_eq!(report.nrows, 1);
    assert_eq!(report.extent.min_x, 10.0);
    assert_approx_eq!(report.extent.max_x, 10.02, 1e-5);

    let out = read_geotiff(&files.out);
    assert_eq!((out.height, out.width), (1, 2));
    assert_eq!(out.pixels, vec![5.0, 7.0]);
    assert_eq!(out.epsg, 4326);
    assert_eq!(out.nodata, "-9999");
}

#[test]
fn test_transform_roundtrip() {
    let samples = create_scattered_samples(2_000, (-3.0, 41.0, 2.5, 44.0), 11);
    let files = write_sample_files(&samples.lon, &samples.lat, &samples.val);

    let report = rasterize(&files.lon, &files.lat, &files.val, &files.out, 0.05).unwrap();
    let out = read_geotiff(&files.out);

    assert_coords_approx_eq!(
        (out.transform.origin_x, out.transform.origin_y),
        (report.extent.min_x, report.extent.max_y),
        1e-9
    );
    assert_approx_eq!(out.transform.pixel_width, 0.05, 1e-12);
    assert_approx_eq!(out.transform.pixel_height, -0.05, 1e-12);
    assert_eq!(out.width, report.ncols);
    assert_eq!(out.height, report.nrows);
    assert_eq!(
        report.ncols,
        ((report.extent.max_x - report.extent.min_x) / 0.05).ceil() as usize
    );
    assert_eq!(
        report.nrows,
        ((report.extent.max_y - report.extent.min_y) / 0.05).ceil() as usize
    );
}

#[test]
fn test_cell_centers_reproduce_grid() {
    let samples = create_cell_center_samples(6, 4, 5.0, 45.0, 0.25);
    let files = write_sample_files(&samples.lon, &samples.lat, &samples.val);

    // Sample extent spans 5 x 3 cells of the source grid, centre to centre.
    let report = rasterize(&files.lon, &files.lat, &files.val, &files.out, 0.25).unwrap();
    assert_eq!((report.nrows, report.ncols), (3, 5));
    assert_eq!(report.filled_cells, 15);

    let out = read_geotiff(&files.out);
    // First row and column map one-to-one; the trailing edge samples clamp
    // onto the last cell and overwrite the previous ones.
    for col in 0..4 {
        assert_eq!(out.pixels[col], (col * 1000) as f32);
    }
    assert_eq!(out.pixels[out.width - 1], 5000.0);
    assert_eq!(report.clamped, 4 + 6 - 1);
}

#[test]
fn test_untouched_cells_are_nodata() {
    let lon = [0.0, 1.0];
    let lat = [0.0, 1.0];
    let val = [3.0, 4.0];
    let files = write_sample_files(&lon, &lat, &val);

    rasterize(&files.lon, &files.lat, &files.val, &files.out, 0.25).unwrap();
    let out = read_geotiff(&files.out);

    assert_eq!((out.height, out.width), (4, 4));
    let filled: Vec<f32> = out
        .pixels
        .iter()
        .copied()
        .filter(|&v| v != OUTPUT_NODATA)
        .collect();
    assert_eq!(filled.len(), 2);
    // North-east corner and south-west corner
    assert_eq!(out.pixels[3], 4.0);
    assert_eq!(out.pixels[12], 3.0);
}

#[test]
fn test_last_sample_wins_at_shared_cell() {
    let lon = [10.0, 10.001, 10.002, 11.0];
    let lat = [50.0, 50.001, 50.002, 49.0];
    let val = [1.0, 2.0, 3.0, 9.0];
    let files = write_sample_files(&lon, &lat, &val);

    let report = rasterize(&files.lon, &files.lat, &files.val, &files.out, 0.5).unwrap();
    assert_eq!(report.overwritten, 2);

    let out = read_geotiff(&files.out);
    assert_eq!(out.pixels[0], 3.0);
}

#[test]
fn test_all_sentinel_is_no_valid_samples() {
    let (lon, lat, val) = scenarios::ALL_SENTINEL;
    let files = write_sample_files(&lon, &lat, &val);

    let err = rasterize(&files.lon, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap_err();
    assert!(matches!(err, RasterizerError::NoValidSamples { total: 3 }));
    assert!(!files.out.exists());
}

#[test]
fn test_out_of_domain_is_no_valid_samples() {
    let (lon, lat, val) = scenarios::OUT_OF_DOMAIN;
    let files = write_sample_files(&lon, &lat, &val);

    let err = rasterize(&files.lon, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap_err();
    assert!(matches!(err, RasterizerError::NoValidSamples { .. }));
    assert!(!files.out.exists());
}

#[test]
fn test_mismatched_lengths_is_shape_mismatch() {
    let files = write_sample_files(&[1.0; 100], &[1.0; 99], &[1.0; 100]);

    let err = rasterize(&files.lon, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap_err();
    assert!(matches!(
        err,
        RasterizerError::ShapeMismatch {
            lon: 100,
            lat: 99,
            val: 100
        }
    ));
    assert!(!files.out.exists());
}

#[test]
fn test_non_positive_resolution() {
    let (lon, lat, val) = scenarios::TWO_COLUMNS;
    let files = write_sample_files(&lon, &lat, &val);

    for res in [0.0, -1.0 / 64.0] {
        let err = rasterize(&files.lon, &files.lat, &files.val, &files.out, res).unwrap_err();
        assert!(matches!(err, RasterizerError::InvalidResolution(_)));
    }
    assert!(!files.out.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let (lon, lat, val) = scenarios::TWO_COLUMNS;
    let files = write_sample_files(&lon, &lat, &val);
    let missing = files.dir.path().join("missing.bin");

    let err = rasterize(&missing, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap_err();
    match err {
        RasterizerError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other}"),
    }
}

#[test]
fn test_unwritable_output_is_io_error() {
    let (lon, lat, val) = scenarios::TWO_COLUMNS;
    let files = write_sample_files(&lon, &lat, &val);
    let out = files.dir.path().join("no-such-dir").join("output.tif");

    let err = rasterize(&files.lon, &files.lat, &files.val, &out, DEFAULT_RES).unwrap_err();
    assert!(matches!(err, RasterizerError::Io { .. }));
}

#[test]
fn test_sentinel_samples_dropped_and_reported() {
    let grid = create_cell_center_samples(4, 4, 0.0, 4.0, 1.0);
    let samples = with_sentinel_every(grid, 4, INPUT_SENTINEL);
    let files = write_sample_files(&samples.lon, &samples.lat, &samples.val);

    let report = rasterize(&files.lon, &files.lat, &files.val, &files.out, 1.0).unwrap();
    assert_eq!(report.total_samples, 16);
    assert_eq!(report.valid_samples, 12);
    assert_eq!(report.dropped_samples, 4);

    let json = report.to_json_pretty().unwrap();
    assert!(json.contains("\"valid_samples\": 12"));
    assert!(json.contains("\"crs\": \"EPSG:4326\""));
}

#[test]
fn test_compressed_output_with_config() {
    let samples = create_scattered_samples(300, (20.0, -10.0, 22.0, -8.0), 3);
    let files = write_sample_files(&samples.lon, &samples.lat, &samples.val);
    let paths = ConversionPaths::new(&files.lon, &files.lat, &files.val, &files.out);

    let config = RasterizerConfig {
        resolution_deg: 0.1,
        compression: GeoTiffCompression::Deflate,
        ..Default::default()
    };
    let report = rasterize_with_config(&paths, &config).unwrap();
    assert_eq!(report.output.as_deref(), Some(files.out.as_path()));

    let out = read_geotiff(&files.out);
    assert_eq!(out.pixels.len(), report.ncols * report.nrows);
    let filled = out.pixels.iter().filter(|&&v| v != OUTPUT_NODATA).count();
    assert_eq!(filled, report.filled_cells);
}

#[test]
fn test_truncated_input_is_malformed() {
    let files = write_sample_files(&[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0]);
    std::fs::write(&files.val, [0u8; 7]).unwrap();

    let err = rasterize(&files.lon, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap_err();
    assert!(matches!(err, RasterizerError::MalformedInput { len: 7, .. }));
}

#[test]
fn test_overwrites_existing_output() {
    let (lon, lat, val) = scenarios::TWO_COLUMNS;
    let files = write_sample_files(&lon, &lat, &val);
    write_f32_bin(&files.out, &[0.0; 1024]);

    rasterize(&files.lon, &files.lat, &files.val, &files.out, DEFAULT_RES).unwrap();
    let out = read_geotiff(&files.out);
    assert_eq!(out.pixels, vec![5.0, 7.0]);
}
