//! Image encoding for Pressroom.
//!
//! This module provides:
//! - JPEG encoding of RGB pixel data with configurable quality
//! - The [`ImageEncoder`] seam the compression pipeline encodes through
//! - [`QualityFactor`] and [`EncodedBlob`], the values exchanged across that seam
//!
//! # Examples
//!
//! ```ignore
//! use pressroom_core::encode::{ImageEncoder, JpegQualityEncoder, QualityFactor};
//!
//! let blob = JpegQualityEncoder.encode(&image, QualityFactor::MAX)?;
//! println!("Encoded {} bytes", blob.byte_count());
//! ```

mod jpeg;
mod types;

pub use jpeg::{encode_jpeg, ImageEncoder, JpegQualityEncoder};
pub use types::{EncodeError, EncodedBlob, QualityFactor};
