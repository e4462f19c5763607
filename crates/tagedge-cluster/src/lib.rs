//! tagedge-cluster — gradient-point cluster extraction
//!
//! Walks the thresholded image and its combined label image, emitting a
//! packed 32-bit gradient point for every qualifying 4-neighbor edge and
//! bucketing points by the hash of the unordered label pair they
//! straddle. [`ClusterMap`] owns the resulting buckets; downstream
//! (`tagedge-quad`) prunes and angularly sorts each surviving bucket.

pub mod cluster;
pub mod config;
pub mod error;
pub mod extract;
pub mod hash;
pub mod point;

pub use cluster::ClusterMap;
pub use config::ClusterConfig;
pub use error::{ClusterError, ClusterResult};
pub use extract::extract;
pub use hash::label_pair_hash;
