//! Budget-driven compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress a `JsRasterImage` to fit a byte budget
//! - [`compress_jpeg_bytes`] - Decode, compress and re-encode file bytes
//! - [`default_compress_options`] - The default options as a plain object
//!
//! Options are a plain object; missing fields take their defaults:
//!
//! ```typescript
//! import { compress_image } from '@pressroom/wasm';
//!
//! const result = compress_image(image, 1024 * 1024, { filter: 'lanczos3' });
//! console.log(`${result.stage}: ${result.byte_length} bytes at q=${result.quality}`);
//! await writable.write(new Blob([result.bytes()], { type: 'image/jpeg' }));
//! ```

use crate::types::JsRasterImage;
use pressroom_core::compress::{
    compress_encoded_with, CompressError, CompressOptions, CompressStage, Compressed, Compressor,
};
use wasm_bindgen::prelude::*;

/// Result of a compression call.
#[wasm_bindgen]
pub struct JsCompressed {
    inner: Compressed,
}

#[wasm_bindgen]
impl JsCompressed {
    /// Pipeline stage that produced the result:
    /// "original", "quality", "size" or "unchanged".
    #[wasm_bindgen(getter)]
    pub fn stage(&self) -> String {
        stage_name(self.inner.stage()).to_string()
    }

    /// Quality factor (0-1) of the encoding, undefined when unchanged.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f64> {
        self.inner.quality().map(f64::from)
    }

    /// Encoded size in bytes (0 when unchanged).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes().map_or(0, <[u8]>::len)
    }

    /// Whether the encoding is within `max_bytes`.
    pub fn fits(&self, max_bytes: u32) -> bool {
        self.inner.fits(u64::from(max_bytes))
    }

    /// The encoded JPEG bytes (copied; empty when unchanged).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().map(<[u8]>::to_vec).unwrap_or_default()
    }

    /// The possibly downscaled image (copied).
    pub fn image(&self) -> JsRasterImage {
        JsRasterImage::from_raster(self.inner.image().clone())
    }
}

/// Compress an image so its JPEG encoding fits `max_bytes`.
///
/// # Arguments
///
/// * `image` - Source image
/// * `max_bytes` - Byte budget
/// * `options` - Optional plain object, see the module docs
///
/// # Errors
///
/// Returns an error for a zero-area image, a zero budget, a pixel buffer that
/// doesn't match the dimensions, or options that cannot be parsed. Missing the
/// budget is not an error; check `fits()`.
#[wasm_bindgen]
pub fn compress_image(
    image: &JsRasterImage,
    max_bytes: u32,
    options: JsValue,
) -> Result<JsCompressed, JsValue> {
    let options = parse_options(options)?;
    compress_with(image, max_bytes, options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode encoded file bytes, compress, and return JPEG bytes.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded or the options are invalid.
#[wasm_bindgen]
pub fn compress_jpeg_bytes(
    bytes: &[u8],
    max_bytes: u32,
    options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let options = parse_options(options)?;
    let compressor = Compressor::with_options(options);
    compress_encoded_with(&compressor, bytes, u64::from(max_bytes))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The default options as a plain object.
#[wasm_bindgen]
pub fn default_compress_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<CompressOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompressOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid compress options: {}", e)))
}

fn compress_with(
    image: &JsRasterImage,
    max_bytes: u32,
    options: CompressOptions,
) -> Result<JsCompressed, CompressError> {
    let raster = image.to_raster()?;
    let inner = Compressor::with_options(options).compress(&raster, u64::from(max_bytes))?;
    Ok(JsCompressed { inner })
}

fn stage_name(stage: CompressStage) -> &'static str {
    match stage {
        CompressStage::Original => "original",
        CompressStage::Quality => "quality",
        CompressStage::Size => "size",
        CompressStage::Unchanged => "unchanged",
    }
}
