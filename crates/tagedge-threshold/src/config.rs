//! Configuration for the adaptive threshold stage.

/// Tunables for [`crate::adaptive::threshold`](crate::adaptive::threshold).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Side length, in pixels, of each tile the image is partitioned into
    /// before computing local min/max extrema. Must be at least 1.
    pub tile_size: u32,
    /// Minimum local contrast (max - min) a tile neighborhood must have
    /// before any pixel in it is classified instead of marked ambiguous.
    pub min_diff: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            tile_size: 4,
            min_diff: 5,
        }
    }
}
