//! Quality search: bounded binary search over the encoder quality factor.
//!
//! The image is always encoded at its original dimensions. The search stops
//! early once a candidate lands in `[tolerance * budget, budget]`.

use tracing::{debug, trace, warn};

use super::CompressOptions;
use crate::decode::RasterImage;
use crate::encode::{EncodedBlob, ImageEncoder, QualityFactor};

/// Result of a quality search.
#[derive(Debug, Clone)]
pub(crate) struct QualityOutcome {
    /// Encoding at `QualityFactor::MAX`; the size stage's baseline.
    pub reference: EncodedBlob,
    /// Best candidate found. Equals `reference` on the fast path.
    pub best: EncodedBlob,
    /// Number of search iterations performed (0 on the fast path).
    pub steps: u32,
}

impl QualityOutcome {
    pub fn reference_fits(&self, budget: u64) -> bool {
        self.reference.fits(budget)
    }
}

/// Run the quality search.
///
/// Returns `None` when the encoder has no representation of the image at full
/// quality (it failed or produced no bytes). A failure later in the search
/// ends it and keeps the best candidate committed so far.
pub(crate) fn search_quality<E>(
    encoder: &E,
    image: &RasterImage,
    budget: u64,
    options: &CompressOptions,
) -> Option<QualityOutcome>
where
    E: ImageEncoder + ?Sized,
{
    let reference = match encoder.encode(image, QualityFactor::MAX) {
        Ok(blob) if !blob.is_empty() => blob,
        Ok(_) => {
            warn!("encoder produced no data at full quality");
            return None;
        }
        Err(err) => {
            warn!(error = %err, "encoder failed at full quality");
            return None;
        }
    };

    if reference.fits(budget) {
        trace!(
            bytes = reference.byte_count(),
            budget,
            "already within budget at full quality"
        );
        return Some(QualityOutcome {
            best: reference.clone(),
            reference,
            steps: 0,
        });
    }

    let close_enough = options.close_enough(budget);
    let mut low = QualityFactor::MIN;
    let mut high = QualityFactor::MAX;
    let mut best = reference.clone();
    let mut steps = 0;

    for _ in 0..options.quality_limit() {
        let quality = low.midpoint(high);
        let candidate = match encoder.encode(image, quality) {
            Ok(blob) if !blob.is_empty() => blob,
            Ok(_) => {
                warn!(quality = quality.get(), "encoder produced no data, ending search");
                break;
            }
            Err(err) => {
                warn!(quality = quality.get(), error = %err, "encoder failed, ending search");
                break;
            }
        };
        steps += 1;

        let bytes = candidate.byte_count();
        debug!(step = steps, quality = quality.get(), bytes, budget, "quality search step");

        let accepted = if (bytes as f64) < close_enough {
            low = quality;
            false
        } else if bytes > budget {
            high = quality;
            false
        } else {
            true
        };

        if is_better(budget, &best, &candidate) {
            best = candidate;
        }
        if accepted {
            break;
        }
    }

    Some(QualityOutcome {
        reference,
        best,
        steps,
    })
}

/// Prefer candidates within budget, the larger the better; among candidates
/// over budget prefer the smaller.
fn is_better(budget: u64, current: &EncodedBlob, candidate: &EncodedBlob) -> bool {
    match (current.fits(budget), candidate.fits(budget)) {
        (true, true) => candidate.byte_count() > current.byte_count(),
        (false, true) => true,
        (true, false) => false,
        (false, false) => candidate.byte_count() < current.byte_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::testing::{solid_image, ScriptedEncoder};

    fn blob(len: usize) -> EncodedBlob {
        EncodedBlob::new(vec![0; len], QualityFactor::MAX)
    }

    #[test]
    fn test_fast_path_skips_search() {
        let encoder = ScriptedEncoder::new(1.0);
        let image = solid_image(10, 10);

        let outcome = search_quality(&encoder, &image, 1000, &CompressOptions::default()).unwrap();

        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.best.quality(), QualityFactor::MAX);
        assert_eq!(outcome.best, outcome.reference);
        assert_eq!(encoder.calls(), 1);
    }

    #[test]
    fn test_search_halves_towards_budget() {
        // 100 bytes at q=1.0, 20 bytes at q=0.0, linear in between
        let encoder = ScriptedEncoder::new(1.0).with_floor(0.2);
        let image = solid_image(10, 10);

        let outcome = search_quality(&encoder, &image, 65, &CompressOptions::default()).unwrap();

        // q=0.5 -> 60 bytes, inside [58.5, 65]
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.best.quality().get(), 0.5);
        assert_eq!(outcome.best.byte_count(), 60);
        assert!(outcome.best.fits(65));
    }

    #[test]
    fn test_search_raises_quality_when_too_small() {
        let encoder = ScriptedEncoder::new(1.0).with_floor(0.2);
        let image = solid_image(10, 10);

        let outcome = search_quality(&encoder, &image, 90, &CompressOptions::default()).unwrap();

        // 0.5 -> 60 (too small), 0.75 -> 80 (too small), 0.875 -> 90 (accept)
        assert_eq!(outcome.steps, 3);
        assert_eq!(outcome.best.quality().get(), 0.875);
        assert_eq!(outcome.best.byte_count(), 90);
    }

    #[test]
    fn test_search_is_bounded() {
        let encoder = ScriptedEncoder::new(1.0).with_floor(0.5);
        let image = solid_image(10, 10);

        // Unreachable: even q=0 yields 50 bytes
        let outcome = search_quality(&encoder, &image, 10, &CompressOptions::default()).unwrap();

        assert_eq!(outcome.steps, 6);
        assert_eq!(encoder.calls(), 7);
        assert!(!outcome.best.fits(10));
        // Smallest over-budget candidate wins: q = 1/64
        assert_eq!(outcome.best.quality().get(), 0.015625);
    }

    #[test]
    fn test_custom_iteration_count() {
        let encoder = ScriptedEncoder::new(1.0).with_floor(0.5);
        let options = CompressOptions {
            quality_iterations: 2,
            ..CompressOptions::default()
        };

        let outcome = search_quality(&encoder, &solid_image(10, 10), 10, &options).unwrap();
        assert_eq!(outcome.steps, 2);
    }

    #[test]
    fn test_no_representation() {
        let options = CompressOptions::default();
        let image = solid_image(4, 4);

        let failing = ScriptedEncoder::new(1.0).failing_after(0);
        assert!(search_quality(&failing, &image, 1, &options).is_none());

        let silent = ScriptedEncoder::new(0.0);
        assert!(search_quality(&silent, &image, 1, &options).is_none());
    }

    #[test]
    fn test_failure_mid_search_keeps_best() {
        // Reference and first midpoint succeed, then the encoder fails
        let encoder = ScriptedEncoder::new(1.0).with_floor(0.2).failing_after(2);
        let image = solid_image(10, 10);
        let outcome = search_quality(&encoder, &image, 50, &CompressOptions::default()).unwrap();

        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.best.byte_count(), 60);
    }

    #[test]
    fn test_is_better_prefers_fitting() {
        assert!(is_better(10, &blob(20), &blob(9)));
        assert!(!is_better(10, &blob(9), &blob(20)));
        assert!(is_better(10, &blob(5), &blob(9)));
        assert!(is_better(10, &blob(30), &blob(20)));
        assert!(!is_better(10, &blob(9), &blob(9)));
    }
}
