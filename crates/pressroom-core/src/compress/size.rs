//! Size reduction: shrink pixel dimensions until the full-quality encoding fits.
//!
//! Each step scales both edges by `sqrt(budget / bytes)`, since encoded size
//! tracks pixel area. Every resized image is re-encoded at full quality.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::decode::{scale_dimensions, RasterImage, Resampler};
use crate::encode::{EncodedBlob, ImageEncoder, QualityFactor};

/// Result of the size reduction loop.
#[derive(Debug, Clone)]
pub(crate) struct SizeOutcome {
    pub image: RasterImage,
    pub blob: EncodedBlob,
    /// Number of committed resize steps.
    pub steps: u32,
}

/// Run the size reduction loop.
///
/// `baseline` must be the full-quality encoding of `image`. The loop stops when
/// the encoding fits, when a step leaves the byte count or dimensions
/// unchanged, when `max_steps` is reached, or when an adapter fails. In every
/// case the last committed image/encoding pair is returned.
pub(crate) fn reduce_size<E, R>(
    encoder: &E,
    resampler: &R,
    image: &RasterImage,
    baseline: EncodedBlob,
    budget: u64,
    max_steps: u32,
) -> SizeOutcome
where
    E: ImageEncoder + ?Sized,
    R: Resampler + ?Sized,
{
    let mut current = Cow::Borrowed(image);
    let mut blob = baseline;
    let mut previous_bytes = None;
    let mut steps = 0;

    while steps < max_steps
        && !blob.fits(budget)
        && previous_bytes != Some(blob.byte_count())
    {
        previous_bytes = Some(blob.byte_count());

        let ratio = (budget as f64 / blob.byte_count() as f64).sqrt();
        let (width, height) = scale_dimensions(current.width(), current.height(), ratio);
        if (width, height) == current.dimensions() {
            debug!(width, height, "dimensions cannot shrink further");
            break;
        }

        let resized = match resampler.resample(&current, width, height) {
            Ok(resized) => resized,
            Err(err) => {
                warn!(width, height, error = %err, "resample failed, keeping last size");
                break;
            }
        };
        let encoded = match encoder.encode(&resized, QualityFactor::MAX) {
            Ok(encoded) if !encoded.is_empty() => encoded,
            Ok(_) => {
                warn!(width, height, "encoder produced no data, keeping last size");
                break;
            }
            Err(err) => {
                warn!(width, height, error = %err, "encoder failed, keeping last size");
                break;
            }
        };

        steps += 1;
        debug!(
            step = steps,
            width,
            height,
            ratio,
            bytes = encoded.byte_count(),
            budget,
            "size reduction step"
        );
        current = Cow::Owned(resized);
        blob = encoded;
    }

    SizeOutcome {
        image: current.into_owned(),
        blob,
        steps,
    }
}
