//! Aggregate configuration for the whole pipeline.

use tagedge_cluster::ClusterConfig;
use tagedge_quad::QuadConfig;
use tagedge_threshold::ThresholdConfig;

/// The tunables exposed end to end, one `Copy` struct built once per
/// `Pipeline`. There is no file/env/CLI surface — callers construct this
/// in-process the same way the stage crates construct their own configs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Forwarded to [`ThresholdConfig::tile_size`].
    pub threshold_tile_size: u32,
    /// Forwarded to [`ThresholdConfig::min_diff`].
    pub threshold_min_diff: u8,
    /// Forwarded to [`QuadConfig::min_cluster_pixels`].
    pub min_cluster_pixels: u32,
    /// Forwarded to [`QuadConfig::max_cluster_multiplier`].
    pub max_cluster_multiplier: u32,
    /// Forwarded to [`ClusterConfig::initial_bucket_capacity`].
    pub initial_bucket_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let threshold = ThresholdConfig::default();
        let cluster = ClusterConfig::default();
        let quad = QuadConfig::default();
        Self {
            threshold_tile_size: threshold.tile_size,
            threshold_min_diff: threshold.min_diff,
            min_cluster_pixels: quad.min_cluster_pixels,
            max_cluster_multiplier: quad.max_cluster_multiplier,
            initial_bucket_capacity: cluster.initial_bucket_capacity,
        }
    }
}

impl PipelineConfig {
    pub(crate) fn threshold_config(&self) -> ThresholdConfig {
        ThresholdConfig {
            tile_size: self.threshold_tile_size,
            min_diff: self.threshold_min_diff,
        }
    }

    pub(crate) fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            initial_bucket_capacity: self.initial_bucket_capacity,
        }
    }

    /// `min_bbox_area` is left at [`QuadConfig::default`]'s value — it is
    /// not one of the options surfaced at the pipeline level.
    pub(crate) fn quad_config(&self) -> QuadConfig {
        QuadConfig {
            min_cluster_pixels: self.min_cluster_pixels,
            max_cluster_multiplier: self.max_cluster_multiplier,
            ..QuadConfig::default()
        }
    }
}
