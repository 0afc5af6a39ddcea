//! JPEG encoding of finished rasters.
//!
//! The pipeline has already flattened everything onto opaque white by the
//! time a raster gets here, so the alpha channel is simply dropped.

use super::error::ImagingError;
use super::params::Quality;
use super::raster::Raster;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;
use tracing::debug;

/// MIME type of every image this module produces.
pub const JPEG_MIME: &str = "image/jpeg";

/// An encoded image, ready to be written to disk or embedded as a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// The payload as standard base64.
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:image/jpeg;base64,...`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64())
    }
}

/// Encode `raster` as a baseline JPEG at `quality`.
pub fn encode(raster: &Raster, quality: Quality) -> Result<EncodedImage, ImagingError> {
    let (width, height) = raster.dimensions();
    if raster.is_empty() {
        return Err(ImagingError::Encode(format!(
            "cannot encode an empty {width}x{height} image"
        )));
    }

    let rgb: Vec<u8> = raster
        .pixels()
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut bytes = Vec::new();
    // Quality is clamped to 1..=100 on construction
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality.value() as u8);
    encoder
        .encode(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ImagingError::Encode(e.to_string()))?;

    debug!(width, height, quality = quality.value(), size = bytes.len(), "Encoded JPEG");
    Ok(EncodedImage {
        mime: JPEG_MIME,
        bytes,
        width,
        height,
    })
}
