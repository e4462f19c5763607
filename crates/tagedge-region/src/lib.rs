//! tagedge-region — dual-polarity connected-component labeling
//!
//! Implements block-based merged-row-scan (BMRS) labeling: each polarity
//! of a thresholded image is labeled independently via a packed-binary
//! plane, a run-length scan over merged row pairs, and a union-find that
//! resolves equivalences discovered through an 8-connectivity flag plane.
//! [`label_dual`] combines both polarities into one label image with
//! disjoint label ranges.

pub mod bmrs;
pub mod error;
pub mod run;

pub use bmrs::{label_dual, label_single, prune_small_labels, solver_capacity};
pub use error::{RegionError, RegionResult};
pub use run::Run;
