//! Pressroom Core - budget-driven image compression
//!
//! This crate re-encodes images so they fit a caller-supplied byte budget,
//! first by searching the JPEG quality factor and then, if that is not enough,
//! by shrinking the image.
//!
//! - [`decode`] - decoding to [`RasterImage`] and the [`decode::Resampler`] seam
//! - [`encode`] - JPEG encoding and the [`encode::ImageEncoder`] seam
//! - [`compress`] - the quality search / size reduction pipeline

pub mod compress;
pub mod decode;
pub mod encode;

pub use compress::{
    compress, compress_encoded, CompressError, CompressOptions, CompressStage, Compressed,
    Compressor, DEFAULT_MAX_BYTES,
};
pub use decode::{DecodeError, FilterType, RasterImage};
pub use encode::{EncodedBlob, QualityFactor};
