//! Configuration for the fit-quads front end.

/// Tunables for [`crate::prune::prune`] and [`crate::center::bounding_box_center`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadConfig {
    /// Buckets with fewer points than this are discarded before fitting —
    /// too small to reliably trace a quad's four edges.
    pub min_cluster_pixels: u32,
    /// A bucket larger than `max_cluster_multiplier * 2 * (width + height)`
    /// is discarded as noise (larger than the image's maximum conceivable
    /// perimeter).
    pub max_cluster_multiplier: u32,
    /// Minimum bounding-box area, in doubled-coordinate units (`(2x, 2y)`
    /// space), a surviving bucket must have. Below this the cluster is too
    /// small to be a real tag boundary rather than noise that slipped past
    /// the point-count filter. Corresponds to roughly an 8x8-pixel tag.
    pub min_bbox_area: i64,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            min_cluster_pixels: 24,
            max_cluster_multiplier: 2,
            min_bbox_area: 256, // (2*8) * (2*8)
        }
    }
}
