//! Construct-once, invoke-many entry point wiring the four stages
//! together over one set of front-loaded buffers.

use log::{debug, trace};
use tagedge_cluster::ClusterMap;
use tagedge_core::{DisjointSet, GrayImage, LabelImage, PackedBinaryImage, BLACK, WHITE};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};

/// Owns every working buffer the pipeline needs for a fixed image size,
/// so repeated calls to [`process`](Self::process) only pay for the work,
/// not for allocation. Not `Sync` — run one `Pipeline` per worker thread,
/// or serialize access to a shared one.
pub struct Pipeline {
    width: u32,
    height: u32,
    config: PipelineConfig,
    disjoint_set: DisjointSet,
    white_plane: PackedBinaryImage,
    black_plane: PackedBinaryImage,
    labels: LabelImage,
    clusters: ClusterMap,
}

impl Pipeline {
    /// Allocate a pipeline for images of exactly `width x height`. The
    /// union-find is sized with [`tagedge_region::solver_capacity`], the
    /// worst-case label count for this image size, so it never needs to
    /// grow across the pipeline's lifetime.
    pub fn new(width: u32, height: u32, config: PipelineConfig) -> PipelineResult<Self> {
        let zeros = vec![0u8; width as usize * height as usize];
        let white_plane = PackedBinaryImage::from_nonzero(&zeros, width, height)?;
        let black_plane = PackedBinaryImage::from_nonzero(&zeros, width, height)?;
        let labels = LabelImage::new(width, height)?;
        let capacity = tagedge_region::solver_capacity(width, height);

        Ok(Self {
            width,
            height,
            config,
            disjoint_set: DisjointSet::with_capacity(capacity),
            white_plane,
            black_plane,
            labels,
            clusters: ClusterMap::new(config.initial_bucket_capacity),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The combined label image produced by the most recent
    /// [`process`](Self::process) call.
    #[inline]
    pub fn labels(&self) -> &LabelImage {
        &self.labels
    }

    /// The bucketed, pruned, angularly-sorted cluster map produced by the
    /// most recent [`process`](Self::process) call.
    #[inline]
    pub fn clusters(&self) -> &ClusterMap {
        &self.clusters
    }

    /// Run all four stages over `image`, which must match the dimensions
    /// this pipeline was constructed with.
    ///
    /// Returns the resulting cluster map (also retrievable afterwards via
    /// [`clusters`](Self::clusters)).
    pub fn process(&mut self, image: &GrayImage) -> PipelineResult<&ClusterMap> {
        if image.width() != self.width || image.height() != self.height {
            return Err(PipelineError::Core(tagedge_core::Error::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            }));
        }

        trace!("threshold stage: {}x{} image", self.width, self.height);
        let thresholded = tagedge_threshold::threshold(image, &self.config.threshold_config())?;

        self.white_plane.fill_eq(thresholded.as_bytes(), WHITE)?;
        self.black_plane.fill_eq(thresholded.as_bytes(), BLACK)?;

        trace!("region stage: labeling both polarities");
        let (labels, n_labels) =
            tagedge_region::label_dual(&self.white_plane, &self.black_plane, &mut self.disjoint_set)?;
        self.labels = labels;

        trace!("cluster stage: extracting gradient points");
        self.clusters =
            tagedge_cluster::extract(&thresholded, &self.labels, &self.config.cluster_config());

        trace!("quad stage: pruning and sorting clusters");
        tagedge_quad::prepare_for_fitting(
            &mut self.clusters,
            self.width,
            self.height,
            &self.config.quad_config(),
        );

        debug!(
            "pipeline: {}x{} image, {} labels, {} clusters",
            self.width,
            self.height,
            n_labels,
            self.clusters.len()
        );

        Ok(&self.clusters)
    }

    /// Zero out every component in [`labels`](Self::labels) whose pixel
    /// count (per the union-find's population counters from the most
    /// recent [`process`](Self::process) call) is below `min_count`.
    ///
    /// This is the optional third pass the original prototype fuses into
    /// labeling's writeback; kept separate here so `process` always
    /// returns the unpruned labeling and callers opt in. Must be called
    /// before the next `process` call resets the union-find's counters.
    pub fn prune_small_components(&mut self, min_count: u32) {
        tagedge_region::prune_small_labels(&mut self.labels, &self.disjoint_set, min_count);
    }
}
