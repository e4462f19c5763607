//! Error types for tagedge-quad

use thiserror::Error;

/// Errors that can occur in the fit-quads front end.
#[derive(Debug, Error)]
pub enum QuadError {
    /// Core library error (invalid dimensions, stride mismatch, ...)
    #[error("core error: {0}")]
    Core(#[from] tagedge_core::Error),
}

/// Result type for fit-quads front-end operations.
pub type QuadResult<T> = Result<T, QuadError>;
