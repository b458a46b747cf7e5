//! Budget-driven JPEG compression.
//!
//! Given an image and a maximum encoded size, [`Compressor`] produces an
//! encoding at or below that size while keeping as much fidelity as it can:
//!
//! 1. **Quality search** encodes at full quality first and returns right away
//!    if that fits. Otherwise it binary-searches the quality factor for a
//!    bounded number of steps at the original dimensions.
//! 2. **Size reduction** runs only if no searched quality fits. It shrinks the
//!    image by `sqrt(budget / bytes)` per step and re-encodes at full quality.
//!
//! The result is best effort: an encoding that is still over budget after both
//! bounded stages is returned as-is rather than reported as an error.
//!
//! # Example
//!
//! ```ignore
//! use pressroom_core::compress::{compress, DEFAULT_MAX_BYTES};
//!
//! let compressed = compress(&image, DEFAULT_MAX_BYTES)?;
//! std::fs::write("out.jpg", compressed.bytes().unwrap_or_default())?;
//! ```

mod quality;
mod size;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::{
    decode_image, DecodeError, FilterResampler, FilterType, RasterImage, Resampler,
};
use crate::encode::{EncodedBlob, ImageEncoder, JpegQualityEncoder, QualityFactor};

use quality::search_quality;
use size::reduce_size;

/// Default byte budget (1 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

/// Binary search steps; six halvings reach a quality precision of 1/64.
pub const QUALITY_SEARCH_ITERATIONS: u32 = 6;

/// Upper bound on resize steps.
pub const SIZE_REDUCTION_ITERATIONS: u32 = 10;

/// A search candidate in `[CLOSE_ENOUGH_RATIO * budget, budget]` ends the search.
pub const CLOSE_ENOUGH_RATIO: f64 = 0.9;

/// Errors returned by the compression entry points.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The image has no area, so there is nothing to encode.
    #[error("Invalid image: {width}x{height} has no area")]
    InvalidImage { width: u32, height: u32 },

    /// A zero-byte budget can never be met.
    #[error("Invalid budget: max_bytes must be greater than zero")]
    InvalidBudget,

    /// Encoded input could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Tunables for the compression pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// Maximum quality search steps, capped at [`QUALITY_SEARCH_ITERATIONS`].
    pub quality_iterations: u32,
    /// Maximum size reduction steps, capped at [`SIZE_REDUCTION_ITERATIONS`].
    pub size_iterations: u32,
    /// Fraction of the budget at which a searched quality is accepted.
    pub tolerance: f64,
    /// Resampling filter used when shrinking.
    pub filter: FilterType,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            quality_iterations: QUALITY_SEARCH_ITERATIONS,
            size_iterations: SIZE_REDUCTION_ITERATIONS,
            tolerance: CLOSE_ENOUGH_RATIO,
            filter: FilterType::default(),
        }
    }
}

impl CompressOptions {
    /// Lower edge of the accepted byte range for `budget`.
    pub(crate) fn close_enough(&self, budget: u64) -> f64 {
        let tolerance = if self.tolerance.is_nan() {
            CLOSE_ENOUGH_RATIO
        } else {
            self.tolerance.clamp(0.0, 1.0)
        };
        tolerance * budget as f64
    }

    /// Quality search steps actually run. Options can only lower the ceiling.
    pub(crate) fn quality_limit(&self) -> u32 {
        self.quality_iterations.min(QUALITY_SEARCH_ITERATIONS)
    }

    /// Size reduction steps actually run. Options can only lower the ceiling.
    pub(crate) fn size_limit(&self) -> u32 {
        self.size_iterations.min(SIZE_REDUCTION_ITERATIONS)
    }
}

/// Which part of the pipeline produced a [`Compressed`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressStage {
    /// The full-quality encoding already fit.
    Original,
    /// A reduced quality at the original dimensions.
    Quality,
    /// A downscaled image encoded at full quality.
    Size,
    /// The encoder had no representation of the image; input returned as-is.
    Unchanged,
}

/// Outcome of a compression call.
#[derive(Debug, Clone)]
pub struct Compressed {
    image: RasterImage,
    encoded: Option<EncodedBlob>,
    stage: CompressStage,
    quality_steps: u32,
    size_steps: u32,
}

impl Compressed {
    fn unchanged(image: &RasterImage) -> Self {
        Self {
            image: image.clone(),
            encoded: None,
            stage: CompressStage::Unchanged,
            quality_steps: 0,
            size_steps: 0,
        }
    }

    /// The (possibly downscaled) image.
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    pub fn into_image(self) -> RasterImage {
        self.image
    }

    /// The chosen encoding; `None` for [`CompressStage::Unchanged`].
    pub fn encoded(&self) -> Option<&EncodedBlob> {
        self.encoded.as_ref()
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.encoded.as_ref().map(EncodedBlob::bytes)
    }

    pub fn byte_count(&self) -> Option<u64> {
        self.encoded.as_ref().map(EncodedBlob::byte_count)
    }

    pub fn quality(&self) -> Option<QualityFactor> {
        self.encoded.as_ref().map(EncodedBlob::quality)
    }

    pub fn stage(&self) -> CompressStage {
        self.stage
    }

    /// Whether the chosen encoding is within `budget` bytes.
    pub fn fits(&self, budget: u64) -> bool {
        self.encoded.as_ref().is_some_and(|blob| blob.fits(budget))
    }

    pub fn quality_steps(&self) -> u32 {
        self.quality_steps
    }

    pub fn size_steps(&self) -> u32 {
        self.size_steps
    }
}

/// The compression pipeline with its encoder and resampler adapters.
///
/// Holds only immutable configuration, so one instance can serve many threads.
#[derive(Debug, Clone)]
pub struct Compressor<E = JpegQualityEncoder, R = FilterResampler> {
    encoder: E,
    resampler: R,
    options: CompressOptions,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor {
    /// JPEG encoder, bilinear resampling, default options.
    pub fn new() -> Self {
        Self::with_options(CompressOptions::default())
    }

    pub fn with_options(options: CompressOptions) -> Self {
        Self::with_adapters(
            JpegQualityEncoder,
            FilterResampler::new(options.filter),
            options,
        )
    }
}

impl<E: ImageEncoder, R: Resampler> Compressor<E, R> {
    pub fn with_adapters(encoder: E, resampler: R, options: CompressOptions) -> Self {
        Self {
            encoder,
            resampler,
            options,
        }
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    /// Quality search followed, if needed, by size reduction.
    ///
    /// # Errors
    ///
    /// Only malformed input is an error: a zero-area image or a zero budget.
    /// Missing the budget is not; check [`Compressed::fits`].
    pub fn compress(
        &self,
        image: &RasterImage,
        max_bytes: u64,
    ) -> Result<Compressed, CompressError> {
        validate(image, max_bytes)?;

        let outcome = search_quality(&self.encoder, image, max_bytes, &self.options);
        let Some(outcome) = outcome else {
            return Ok(Compressed::unchanged(image));
        };

        if outcome.reference_fits(max_bytes) {
            let reference = outcome.reference;
            return Ok(self.finish(image.clone(), reference, CompressStage::Original, 0, 0));
        }
        if outcome.best.fits(max_bytes) {
            return Ok(self.searched(image, outcome.best, outcome.steps));
        }

        let sized = reduce_size(
            &self.encoder,
            &self.resampler,
            image,
            outcome.reference,
            max_bytes,
            self.options.size_limit(),
        );

        // Nothing was resized, so the searched quality is the smaller result
        if sized.steps == 0 {
            return Ok(self.searched(image, outcome.best, outcome.steps));
        }

        Ok(self.finish(
            sized.image,
            sized.blob,
            CompressStage::Size,
            outcome.steps,
            sized.steps,
        ))
    }

    /// Quality search only; dimensions are never changed.
    pub fn compress_quality(
        &self,
        image: &RasterImage,
        max_bytes: u64,
    ) -> Result<Compressed, CompressError> {
        validate(image, max_bytes)?;

        let outcome = search_quality(&self.encoder, image, max_bytes, &self.options);
        let Some(outcome) = outcome else {
            return Ok(Compressed::unchanged(image));
        };

        let stage = if outcome.steps == 0 {
            CompressStage::Original
        } else {
            CompressStage::Quality
        };
        Ok(self.finish(image.clone(), outcome.best, stage, outcome.steps, 0))
    }

    /// Size reduction only; every encoding is made at full quality.
    pub fn compress_size(
        &self,
        image: &RasterImage,
        max_bytes: u64,
    ) -> Result<Compressed, CompressError> {
        validate(image, max_bytes)?;

        let baseline = match self.encoder.encode(image, QualityFactor::MAX) {
            Ok(blob) if !blob.is_empty() => blob,
            _ => return Ok(Compressed::unchanged(image)),
        };
        if baseline.fits(max_bytes) {
            return Ok(self.finish(image.clone(), baseline, CompressStage::Original, 0, 0));
        }

        let sized = reduce_size(
            &self.encoder,
            &self.resampler,
            image,
            baseline,
            max_bytes,
            self.options.size_limit(),
        );
        let stage = if sized.steps == 0 {
            CompressStage::Original
        } else {
            CompressStage::Size
        };
        Ok(self.finish(sized.image, sized.blob, stage, 0, sized.steps))
    }

    fn searched(&self, image: &RasterImage, blob: EncodedBlob, steps: u32) -> Compressed {
        self.finish(image.clone(), blob, CompressStage::Quality, steps, 0)
    }

    fn finish(
        &self,
        image: RasterImage,
        blob: EncodedBlob,
        stage: CompressStage,
        quality_steps: u32,
        size_steps: u32,
    ) -> Compressed {
        debug!(
            ?stage,
            width = image.width(),
            height = image.height(),
            quality = blob.quality().get(),
            bytes = blob.byte_count(),
            quality_steps,
            size_steps,
            "compression finished"
        );
        Compressed {
            image,
            encoded: Some(blob),
            stage,
            quality_steps,
            size_steps,
        }
    }
}

fn validate(image: &RasterImage, max_bytes: u64) -> Result<(), CompressError> {
    if image.is_empty() {
        return Err(CompressError::InvalidImage {
            width: image.width(),
            height: image.height(),
        });
    }
    if max_bytes == 0 {
        return Err(CompressError::InvalidBudget);
    }
    Ok(())
}

/// Compress with the JPEG encoder and default options.
pub fn compress(image: &RasterImage, max_bytes: u64) -> Result<Compressed, CompressError> {
    Compressor::new().compress(image, max_bytes)
}

/// Decode `bytes`, compress, and return the encoded result.
///
/// The output is JPEG, except when the encoder cannot represent the decoded
/// image: then the input bytes are returned untouched, in whatever format they
/// arrived.
pub fn compress_encoded(bytes: &[u8], max_bytes: u64) -> Result<Vec<u8>, CompressError> {
    compress_encoded_with(&Compressor::new(), bytes, max_bytes)
}

/// [`compress_encoded`] with a caller-configured [`Compressor`].
pub fn compress_encoded_with<E: ImageEncoder, R: Resampler>(
    compressor: &Compressor<E, R>,
    bytes: &[u8],
    max_bytes: u64,
) -> Result<Vec<u8>, CompressError> {
    let image = decode_image(bytes)?;
    let compressed = compressor.compress(&image, max_bytes)?;
    Ok(match compressed.encoded {
        Some(blob) => blob.into_bytes(),
        None => bytes.to_vec(),
    })
}



// ============================================================================
// Property-Based Tests
// ============================================================================
