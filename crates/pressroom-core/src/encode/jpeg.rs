//! JPEG encoding through the `image` crate.
//!
//! [`encode_jpeg`] is the raw codec call; [`JpegQualityEncoder`] adapts it to
//! the [`ImageEncoder`] seam used by the compression pipeline.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder as _};

use super::{EncodeError, EncodedBlob, QualityFactor};
use crate::decode::RasterImage;

/// Encoder adapter consumed by the compression pipeline.
///
/// Implementations must be deterministic for fixed inputs and reentrant, since
/// one `Compressor` may be shared between threads.
pub trait ImageEncoder: Send + Sync {
    fn encode(
        &self,
        image: &RasterImage,
        quality: QualityFactor,
    ) -> Result<EncodedBlob, EncodeError>;
}

/// Baseline JPEG encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JpegQualityEncoder;

impl ImageEncoder for JpegQualityEncoder {
    fn encode(
        &self,
        image: &RasterImage,
        quality: QualityFactor,
    ) -> Result<EncodedBlob, EncodeError> {
        let bytes = encode_jpeg(
            image.pixels(),
            image.width(),
            image.height(),
            quality.to_jpeg_quality(),
        )?;
        Ok(EncodedBlob::new(bytes, quality))
    }
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100), out-of-range values are clamped
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
