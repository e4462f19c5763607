//! Error types for tagedge-region

use thiserror::Error;

/// Errors that can occur during connected-component labeling.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error (invalid dimensions, stride mismatch, ...)
    #[error("core error: {0}")]
    Core(#[from] tagedge_core::Error),
}

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;
