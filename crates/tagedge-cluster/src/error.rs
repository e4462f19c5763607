//! Error types for tagedge-cluster

use thiserror::Error;

/// Errors that can occur during gradient-cluster extraction.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Core library error (invalid dimensions, stride mismatch, ...)
    #[error("core error: {0}")]
    Core(#[from] tagedge_core::Error),
}

/// Result type for gradient-cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
