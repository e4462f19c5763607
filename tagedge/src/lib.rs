//! tagedge — preprocessing and edge-extraction front end for an
//! AprilTag-style fiducial detector.
//!
//! Wires four independently-usable stages into one construct-once,
//! invoke-many [`Pipeline`]:
//!
//! 1. `tagedge-threshold` — adaptive, tile-based thresholding
//! 2. `tagedge-region` — dual-polarity BMRS connected-component labeling
//! 3. `tagedge-cluster` — gradient-point cluster extraction
//! 4. `tagedge-quad` — fit-quads front end (prune, center, angular sort)
//!
//! Decoding compressed image formats, driving a camera, looking up tag
//! families, and solving for pose are all out of scope — this crate stops
//! at a pruned, angularly-sorted set of candidate quad boundaries.
//!
//! # Example
//!
//! ```
//! use tagedge::{Pipeline, PipelineConfig};
//! use tagedge_core::GrayImage;
//!
//! let data = vec![0u8; 32 * 32];
//! let image = GrayImage::new(&data, 32, 32).unwrap();
//! let mut pipeline = Pipeline::new(32, 32, PipelineConfig::default()).unwrap();
//! let clusters = pipeline.process(&image).unwrap();
//! assert!(clusters.is_empty()); // a blank image has no edges
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod pool;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
pub use pool::{LabelPool, PooledLabelImage};

pub use tagedge_cluster as cluster;
pub use tagedge_core as core;
pub use tagedge_quad as quad;
pub use tagedge_region as region;
pub use tagedge_threshold as threshold;
