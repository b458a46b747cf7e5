//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core Pressroom types and handle the conversion between
//! Rust and JavaScript data representations.

use pressroom_core::decode::{DecodeError, FilterType, RasterImage};
use wasm_bindgen::prelude::*;

/// An RGB raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it into a
/// JavaScript `Uint8Array`; keep images in WASM memory between calls where
/// possible and only extract pixels when needed.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    scale: f32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new image from dimensions and RGB pixel data (scale 1.0).
    ///
    /// The buffer length is validated when the image is passed to a
    /// compression or encoding function.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            scale: 1.0,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per point (e.g. 2.0 for a retina capture).
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[wasm_bindgen(setter)]
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Number of bytes in the pixel buffer.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases the memory otherwise.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(image: RasterImage) -> Self {
        let (width, height) = image.dimensions();
        let scale = image.scale();
        Self {
            width,
            height,
            scale,
            pixels: image.into_pixels(),
        }
    }

    /// Convert to a core `RasterImage`, cloning the pixel data.
    pub(crate) fn to_raster(&self) -> Result<RasterImage, DecodeError> {
        Ok(RasterImage::new(self.width, self.height, self.pixels.clone())?.with_scale(self.scale))
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// 0 = Nearest, 2 = Lanczos3, anything else = Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_image_creation() {
        let img = JsRasterImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.scale(), 1.0);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_raster_roundtrip_keeps_scale() {
        let mut img = JsRasterImage::new(4, 2, vec![7u8; 4 * 2 * 3]);
        img.set_scale(2.0);

        let raster = img.to_raster().unwrap();
        assert_eq!(raster.scale(), 2.0);
        assert_eq!(raster.point_size(), (2.0, 1.0));

        let back = JsRasterImage::from_raster(raster);
        assert_eq!(back.scale(), 2.0);
        assert_eq!(back.pixels(), vec![7u8; 24]);
    }

    #[test]
    fn test_to_raster_rejects_bad_buffer() {
        let img = JsRasterImage::new(10, 10, vec![0u8; 12]);
        assert!(matches!(
            img.to_raster(),
            Err(DecodeError::BufferMismatch { .. })
        ));
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }
}
