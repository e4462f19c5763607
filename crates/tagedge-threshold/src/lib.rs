//! tagedge-threshold — adaptive, tile-based thresholding
//!
//! Turns a grayscale [`tagedge_core::GrayImage`] into a tri-valued
//! [`tagedge_core::ThresholdedImage`] whose pixels are each `0` (black),
//! `255` (white), or `127` (ambiguous — local contrast too low to trust).
//! The region stage treats `127` as a hard poison value that never
//! participates in a connected component.

pub mod adaptive;
pub mod config;
pub mod error;

pub use adaptive::threshold;
pub use config::ThresholdConfig;
pub use error::{ThresholdError, ThresholdResult};
