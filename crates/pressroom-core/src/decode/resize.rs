//! Image resampling for the size reduction stage.
//!
//! All functions return new `RasterImage` instances without modifying the input.

use super::{DecodeError, FilterType, RasterImage};

/// Geometric resize of a raster image to exact dimensions.
///
/// Implementations must be pure and reentrant: the same input always yields
/// the same output and no state is shared between calls.
pub trait Resampler: Send + Sync {
    fn resample(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, DecodeError>;
}

/// Resampler backed by `image::imageops::resize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterResampler {
    pub filter: FilterType,
}

impl FilterResampler {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Resampler for FilterResampler {
    fn resample(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, DecodeError> {
        resize(image, width, height, self.filter)
    }
}

/// Resize an image to exact dimensions.
///
/// The display scale of the source is carried over to the result.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// or `DecodeError::CorruptedFile` if the source buffer cannot be converted.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized).with_scale(image.scale()))
}

/// Scale both dimensions by `ratio`, rounding to the nearest pixel.
///
/// The result is floored at 1x1 and never exceeds the input dimensions, so a
/// ratio above 1.0 (or NaN) leaves the dimensions unchanged.
pub fn scale_dimensions(width: u32, height: u32, ratio: f64) -> (u32, u32) {
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) };
    let scale = |edge: u32| -> u32 {
        let scaled = (f64::from(edge) * ratio).round() as u32;
        scaled.clamp(1, edge.max(1))
    };
    (scale(width), scale(height))
}
