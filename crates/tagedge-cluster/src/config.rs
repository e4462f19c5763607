//! Configuration for gradient-cluster extraction.

/// Tunables for [`crate::extract::extract`](crate::extract::extract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Capacity reserved for a bucket's point vector the first time a
    /// label pair is seen. Sized for the expected boundary length of a
    /// typical tag; undersizing only costs a few reallocations.
    pub initial_bucket_capacity: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            initial_bucket_capacity: 2048,
        }
    }
}
