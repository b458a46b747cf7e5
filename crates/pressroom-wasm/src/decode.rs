//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an encoded image (EXIF orientation applied)
//! - [`resize`] - Resize an image to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@pressroom/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{filter_from_u8, JsRasterImage};
use pressroom_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an encoded image (JPEG or PNG) from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a supported format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// * `filter` - 0=Nearest, 1=Bilinear (default), 2=Lanczos3
///
/// # Errors
///
/// Returns an error if either dimension is zero or the pixel buffer does not
/// match the image dimensions.
#[wasm_bindgen]
pub fn resize(
    image: &JsRasterImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    resize_image(image, width, height, filter)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn resize_image(
    image: &JsRasterImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<decode::RasterImage, decode::DecodeError> {
    let raster = image.to_raster()?;
    decode::resize(&raster, width, height, filter_from_u8(filter))
}
