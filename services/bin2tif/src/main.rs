//! Scattered sample to GeoTIFF converter.
//!
//! Reads three little-endian f32 `.bin` files (longitude, latitude, value)
//! and writes a single-band WGS84 GeoTIFF on a regular grid.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rasterizer::{
    rasterize_with_config, ConversionPaths, GeoTiffCompression, RasterReport, RasterizerConfig,
};

/// Inputs used by `--debug` when a path flag is omitted.
const DEBUG_LON: &str = "longitude.bin";
const DEBUG_LAT: &str = "latitude.bin";
const DEBUG_VAL: &str = "values.bin";
const DEBUG_OUT: &str = "output.tif";

#[derive(Parser, Debug)]
#[command(name = "bin2tif")]
#[command(about = "Convert lon/lat/value .bin files to a GeoTIFF grid")]
struct Args {
    /// Path to longitude .bin (little-endian f32)
    #[arg(long)]
    lon: Option<PathBuf>,

    /// Path to latitude .bin (little-endian f32)
    #[arg(long)]
    lat: Option<PathBuf>,

    /// Path to values .bin (little-endian f32)
    #[arg(long)]
    val: Option<PathBuf>,

    /// Output GeoTIFF path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Grid resolution in degrees (default 1/64, or RASTER_RESOLUTION_DEG)
    #[arg(long, allow_negative_numbers = true)]
    res: Option<f64>,

    /// No-data value written to empty cells
    #[arg(long, allow_negative_numbers = true)]
    nodata: Option<f32>,

    /// GeoTIFF compression: none, lzw or deflate
    #[arg(long)]
    compression: Option<String>,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Fill omitted paths with longitude.bin, latitude.bin, values.bin and output.tif
    #[arg(long)]
    debug: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    // Optional .env next to the working directory
    if let Ok(path) = dotenvy::dotenv() {
        info!(path = %path.display(), "Loaded .env");
    }

    run(&args)?;
    Ok(())
}

/// Resolve paths and config, convert, and write the optional report.
fn run(args: &Args) -> Result<RasterReport> {
    let paths = resolve_paths(args)?;
    let config = build_config(args)?;
    info!(
        resolution = config.resolution_deg,
        nodata = config.nodata,
        compression = %config.compression,
        "Starting conversion"
    );

    let report = rasterize_with_config(&paths, &config)
        .with_context(|| format!("failed to convert samples to {}", paths.out.display()))?;

    info!(
        total = report.total_samples,
        valid = report.valid_samples,
        dropped = report.dropped_samples,
        ncols = report.ncols,
        nrows = report.nrows,
        filled_cells = report.filled_cells,
        overwritten = report.overwritten,
        output = %paths.out.display(),
        "Conversion completed"
    );

    if let Some(report_path) = &args.report {
        let json = report.to_json_pretty()?;
        std::fs::write(report_path, json)
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
        info!(path = %report_path.display(), "Wrote conversion report");
    }

    Ok(report)
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// All four paths are required unless `--debug` supplies the defaults.
fn resolve_paths(args: &Args) -> Result<ConversionPaths> {
    let given = [
        ("--lon", &args.lon, DEBUG_LON),
        ("--lat", &args.lat, DEBUG_LAT),
        ("--val", &args.val, DEBUG_VAL),
        ("--out", &args.out, DEBUG_OUT),
    ];

    let missing: Vec<&str> = given
        .iter()
        .filter(|(_, path, _)| path.is_none())
        .map(|(flag, _, _)| *flag)
        .collect();

    if !missing.is_empty() {
        if !args.debug {
            bail!(
                "missing required argument(s): {} (use --debug to fall back to local defaults)",
                missing.join(", ")
            );
        }
        warn!(missing = ?missing, "Debug mode: using default local paths");
    }

    let [lon, lat, val, out] =
        given.map(|(_, path, default)| path.clone().unwrap_or_else(|| PathBuf::from(default)));
    Ok(ConversionPaths { lon, lat, val, out })
}

/// Environment first, then command-line overrides.
fn build_config(args: &Args) -> Result<RasterizerConfig> {
    let mut config = RasterizerConfig::from_env();

    if let Some(res) = args.res {
        config.resolution_deg = res;
    }
    if let Some(nodata) = args.nodata {
        config.nodata = nodata;
    }
    if let Some(compression) = &args.compression {
        config.compression = GeoTiffCompression::from_str(compression);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
