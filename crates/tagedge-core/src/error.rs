//! Error types for tagedge-core
//!
//! Provides the root error type shared by every stage of the pipeline.
//! Each variant captures enough context for diagnostics without exposing
//! internal buffer layout.

use thiserror::Error;

/// Root error type for the tagedge pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height falls outside the supported range
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A working buffer could not be sized/allocated at construction
    #[error("allocation failed: {0}")]
    AllocationFailed(&'static str),

    /// Caller-supplied image buffer is not contiguous or row pitch != width
    #[error("input stride mismatch: expected {expected} bytes, got {actual}")]
    InputStrideMismatch { expected: usize, actual: usize },

    /// Index out of bounds for the given image dimensions
    #[error("index out of bounds: ({x}, {y}) for {width}x{height} image")]
    IndexOutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// A label id was referenced that the union-find never issued
    #[error("invalid label id: {0}")]
    InvalidLabel(u32),
}

/// Result type alias for tagedge operations
pub type Result<T> = std::result::Result<T, Error>;
