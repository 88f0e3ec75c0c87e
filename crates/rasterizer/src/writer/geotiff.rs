//! Single-band float GeoTIFF encoder.
//!
//! Pure Rust (no GDAL). Georeferencing is stored the way GDAL reads it:
//! ModelPixelScale + ModelTiepoint for the affine transform, a GeoKey
//! directory for the CRS and the GDAL_NODATA ASCII tag for the no-data value.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::{Compression, DeflateLevel, TiffEncoder};
use tiff::tags::Tag;
use tracing::{debug, warn};

use crate::config::GeoTiffCompression;
use crate::error::{RasterizerError, Result};
use crate::grid::Raster;

// GeoTIFF tag IDs
pub const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
pub const GEOTIFF_MODELTIEPOINT: u16 = 33922;
pub const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
pub const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;
pub const GDAL_NODATA: u16 = 42113;

// GeoKey IDs
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const GEOG_CITATION_GEO_KEY: u16 = 2049;

// GeoKey values
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// Builder for GeoTIFF output.
pub struct GeoTiffWriter<'a> {
    raster: &'a Raster,
    compression: GeoTiffCompression,
}

impl<'a> GeoTiffWriter<'a> {
    #[must_use]
    pub fn new(raster: &'a Raster) -> Self {
        Self {
            raster,
            compression: GeoTiffCompression::default(),
        }
    }

    #[must_use]
    pub fn compression(mut self, compression: GeoTiffCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Write to a file path, creating or truncating it.
    ///
    /// The file is flushed before returning. On an encoding failure the
    /// partially written file is removed.
    pub fn write<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let path = path.as_ref();
        let (width, height) = self.dimensions()?;

        let file = File::create(path).map_err(|e| RasterizerError::io(path, e))?;
        self.write_file(BufWriter::new(file), path, width, height)
    }

    /// Encode into `writer`, which backs the file at `path`.
    ///
    /// The file is removed if encoding or the final flush fails.
    fn write_file<W: Write + Seek>(
        &self,
        mut writer: W,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let result = self
            .encode(&mut writer, width, height)
            .and_then(|()| writer.flush().map_err(RasterizerError::Stream))
            .map_err(|e| e.with_path(path));
        drop(writer);

        if result.is_err() {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "Could not remove partial output");
            }
        }
        result
    }

    /// Write to any writer that implements Write + Seek.
    pub fn write_to<W: Write + Seek>(self, writer: W) -> Result<()> {
        let (width, height) = self.dimensions()?;
        self.encode(writer, width, height)
    }

    /// Encode to an in-memory buffer.
    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    fn dimensions(&self) -> Result<(u32, u32)> {
        let raster = self.raster;
        let too_large = || RasterizerError::GridTooLarge {
            nrows: raster.height,
            ncols: raster.width,
        };

        if raster.width == 0 || raster.height == 0 {
            return Err(RasterizerError::Encode(
                "raster has zero dimensions".to_string(),
            ));
        }
        if raster.data.len() != raster.width * raster.height {
            return Err(RasterizerError::Encode(format!(
                "raster holds {} values, expected {}",
                raster.data.len(),
                raster.width * raster.height
            )));
        }

        let width = u32::try_from(raster.width).map_err(|_| too_large())?;
        let height = u32::try_from(raster.height).map_err(|_| too_large())?;
        Ok((width, height))
    }

    fn encode<W: Write + Seek>(&self, writer: W, width: u32, height: u32) -> Result<()> {
        let compression = match self.compression {
            GeoTiffCompression::None => Compression::Uncompressed,
            GeoTiffCompression::Lzw => Compression::Lzw,
            GeoTiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        };

        let mut encoder = TiffEncoder::new(writer)?.with_compression(compression);
        let mut image = encoder.new_image::<Gray32Float>(width, height)?;
        self.write_geotiff_tags(image.encoder())?;
        image.write_data(&self.raster.data)?;

        debug!(
            width,
            height,
            compression = %self.compression,
            "Encoded GeoTIFF"
        );
        Ok(())
    }

    fn write_geotiff_tags<W: Write + Seek, K: tiff::encoder::TiffKind>(
        &self,
        dir: &mut tiff::encoder::DirectoryEncoder<W, K>,
    ) -> Result<()> {
        let raster = self.raster;

        let pixel_scale = raster.transform.pixel_scale();
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELPIXELSCALE), pixel_scale.as_slice())?;

        // Ties pixel (0, 0) to (min_lon, max_lat)
        let tiepoint = raster.transform.tiepoint();
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), tiepoint.as_slice())?;

        let geokeys = self.build_geokey_directory();
        dir.write_tag(Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY), geokeys.as_slice())?;

        let ascii_params = format!("{}|", raster.crs.citation());
        dir.write_tag(Tag::Unknown(GEOTIFF_GEOASCIIPARAMS), ascii_params.as_str())?;

        let nodata = format_nodata(raster.nodata);
        dir.write_tag(Tag::Unknown(GDAL_NODATA), nodata.as_str())?;

        Ok(())
    }

    /// GeoKeyDirectory: header `[version, revision, minor, count]` followed by
    /// `[key, location, count, value]` entries sorted by key.
    fn build_geokey_directory(&self) -> Vec<u16> {
        let crs = self.raster.crs;
        let citation_len = crs.citation().len() as u16 + 1;

        let mut keys = vec![1, 1, 0, 4];
        keys.extend_from_slice(&[GT_MODEL_TYPE_GEO_KEY, 0, 1, MODEL_TYPE_GEOGRAPHIC]);
        keys.extend_from_slice(&[GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA]);
        keys.extend_from_slice(&[GEOGRAPHIC_TYPE_GEO_KEY, 0, 1, crs.epsg()]);
        // Citation lives in GeoAsciiParams at offset 0
        keys.extend_from_slice(&[
            GEOG_CITATION_GEO_KEY,
            GEOTIFF_GEOASCIIPARAMS,
            citation_len,
            0,
        ]);
        keys
    }
}

/// GDAL stores no-data as text; integral values are written without a
/// fractional part ("-9999").
fn format_nodata(nodata: f32) -> String {
    if nodata.fract() == 0.0 && nodata.abs() < 1.0e15 {
        format!("{}", nodata as i64)
    } else {
        format!("{}", nodata)
    }
}

impl Raster {
    /// Get a GeoTIFF writer builder for more control over output options.
    #[must_use]
    pub fn geotiff_writer(&self) -> GeoTiffWriter<'_> {
        GeoTiffWriter::new(self)
    }
}
