//! Values exchanged with the encoder adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoder lossiness in `[0.0, 1.0]`; 1.0 keeps the most detail.
///
/// Values are clamped on construction, NaN becomes 0.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct QualityFactor(f64);

impl QualityFactor {
    pub const MIN: QualityFactor = QualityFactor(0.0);
    pub const MAX: QualityFactor = QualityFactor(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Midpoint between two factors.
    pub fn midpoint(self, other: QualityFactor) -> QualityFactor {
        QualityFactor((self.0 + other.0) / 2.0)
    }

    /// Map onto the JPEG encoder's 1-100 scale.
    pub fn to_jpeg_quality(self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl Default for QualityFactor {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<f64> for QualityFactor {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<QualityFactor> for f64 {
    fn from(value: QualityFactor) -> Self {
        value.0
    }
}

/// Bytes produced by an encoder for one `(image, quality)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBlob {
    bytes: Vec<u8>,
    quality: QualityFactor,
}

impl EncodedBlob {
    pub fn new(bytes: Vec<u8>, quality: QualityFactor) -> Self {
        Self { bytes, quality }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Quality the bytes were encoded at.
    pub fn quality(&self) -> QualityFactor {
        self.quality
    }

    pub fn byte_count(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// An empty blob means the encoder had no representation for the image.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn fits(&self, budget: u64) -> bool {
        self.byte_count() <= budget
    }
}
