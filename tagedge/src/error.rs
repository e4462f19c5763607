//! Error types for the tagedge façade.

use thiserror::Error;

/// Errors that can occur while constructing or running a [`crate::Pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error (invalid dimensions, stride mismatch, ...)
    #[error("core error: {0}")]
    Core(#[from] tagedge_core::Error),

    /// Adaptive threshold stage error.
    #[error("threshold stage error: {0}")]
    Threshold(#[from] tagedge_threshold::ThresholdError),

    /// Connected-component labeling stage error.
    #[error("region stage error: {0}")]
    Region(#[from] tagedge_region::RegionError),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
