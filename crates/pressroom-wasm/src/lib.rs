//! Pressroom WASM - WebAssembly bindings for Pressroom
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and resize bindings
//! - `encode` - JPEG encoding bindings
//! - `compress` - Budget-driven compression bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, compress_image } from '@pressroom/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const result = compress_image(image, 1024 * 1024);
//! console.log(`${result.stage}: ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod decode;
mod encode;
mod types;

pub use compress::{compress_image, compress_jpeg_bytes, default_compress_options, JsCompressed};
pub use decode::{decode_image, resize};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use types::JsRasterImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default byte budget used when callers have no better figure (1 MiB).
#[wasm_bindgen]
pub fn default_max_bytes() -> u32 {
    pressroom_core::DEFAULT_MAX_BYTES as u32
}
