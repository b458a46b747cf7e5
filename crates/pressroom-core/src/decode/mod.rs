//! Image decoding and resampling for Pressroom.
//!
//! This module provides:
//! - [`RasterImage`], the immutable RGB image every pipeline stage consumes
//! - Decoding of encoded bytes with EXIF orientation correction
//! - The [`Resampler`] seam used by the size reduction stage
//!
//! All operations are synchronous and allocate a new image per transformation.

mod jpeg;
mod resize;
mod types;

pub use jpeg::decode_image;
pub use resize::{resize, scale_dimensions, FilterResampler, Resampler};
pub use types::{DecodeError, FilterType, Orientation, RasterImage};
