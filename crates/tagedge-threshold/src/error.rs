//! Error types for tagedge-threshold

use thiserror::Error;

/// Errors that can occur while adaptively thresholding an image.
#[derive(Debug, Error)]
pub enum ThresholdError {
    /// Core library error (invalid dimensions, stride mismatch, ...)
    #[error("core error: {0}")]
    Core(#[from] tagedge_core::Error),
}

/// Result type for threshold operations.
pub type ThresholdResult<T> = Result<T, ThresholdError>;
