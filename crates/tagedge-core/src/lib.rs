//! tagedge-core — shared data model for the tagedge fiducial-edge pipeline
//!
//! This crate provides the data structures every stage of the pipeline is
//! built on:
//!
//! - [`GrayImage`] / [`ThresholdedImage`] — byte images
//! - [`PackedBinaryImage`] — row-padded, word-packed binary planes
//! - [`LabelImage`] — per-pixel component labels
//! - [`DisjointSet`] — union-find with population counts
//! - [`geometry::BoundingBox`] — axis-aligned bounding boxes
//!
//! # Example
//!
//! ```
//! use tagedge_core::GrayImage;
//!
//! let data = [0u8, 255, 255, 0];
//! let img = GrayImage::new(&data, 2, 2).unwrap();
//! assert_eq!(img.width(), 2);
//! assert_eq!(img.get_pixel(1, 0), Some(255));
//! ```

pub mod disjoint_set;
pub mod error;
pub mod geometry;
pub mod image;
pub mod label;
pub mod packed;

pub use disjoint_set::DisjointSet;
pub use error::{Error, Result};
pub use geometry::BoundingBox;
pub use image::{AMBIGUOUS, BLACK, GrayImage, MAX_DIMENSION, MIN_DIMENSION, ThresholdedImage, WHITE};
pub use label::LabelImage;
pub use packed::{PackedBinaryImage, SIMD_WORD_COUNT};
