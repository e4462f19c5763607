//! Gradient-cluster extraction — walk the four forward neighbor offsets of
//! every anchor pixel and bucket edge points by the unordered pair of
//! labels they straddle.

use log::trace;
use tagedge_core::LabelImage;
use tagedge_core::image::{AMBIGUOUS, ThresholdedImage};

use crate::cluster::ClusterMap;
use crate::config::ClusterConfig;
use crate::hash::label_pair_hash;
use crate::point::encode;

/// The four forward-scanning neighbor offsets checked from each anchor.
const OFFSETS: [(i32, i32); 4] = [
    (1, 0),  // E
    (0, 1),  // S
    (1, 1),  // SE
    (-1, 1), // SW
];

/// Whether the anchor at `(x, y)` should suppress its SW-direction
/// gradient point (`dx=-1, dy=+1`) because the same physical edge is
/// already implied by the anchor's W and S neighbors sharing labels with
/// the anchor and the SW candidate respectively.
fn suppress_sw(labels: &LabelImage, x: u32, y: u32) -> bool {
    if x == 0 || y + 1 >= labels.height() {
        return false;
    }
    let anchor = labels.get(x, y);
    let west = labels.get(x - 1, y);
    let south = labels.get(x, y + 1);
    let southwest = labels.get(x - 1, y + 1);
    (west == anchor && south == southwest) || (west == southwest && anchor == south)
}

/// Extract gradient-point clusters from a thresholded image and its
/// combined label image.
///
/// For every anchor pixel, each of the four forward neighbor offsets is
/// tested; a point is emitted iff the anchor is not ambiguous, the anchor
/// and neighbor values sum to `255` (one is white, the other black), both
/// sides carry a positive label, and (for the SW offset only) the
/// de-duplication rule in [`suppress_sw`] does not suppress it. Emission
/// order is row-major over anchor positions.
pub fn extract(
    thresholded: &ThresholdedImage,
    labels: &LabelImage,
    config: &ClusterConfig,
) -> ClusterMap {
    let width = thresholded.width();
    let height = thresholded.height();
    let mut map = ClusterMap::new(config.initial_bucket_capacity);
    let mut emitted = 0usize;

    for y in 0..height {
        for x in 0..width {
            let anchor_value = thresholded.get_pixel(x, y).unwrap();
            if anchor_value == AMBIGUOUS {
                continue;
            }
            let anchor_label = labels.get(x, y);
            if anchor_label == 0 {
                continue;
            }

            for &(dx, dy) in &OFFSETS {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx as u32 >= width || ny as u32 >= height {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);

                if dx == -1 && dy == 1 && suppress_sw(labels, x, y) {
                    continue;
                }

                let neighbor_value = thresholded.get_pixel(nx, ny).unwrap();
                if anchor_value as u32 + neighbor_value as u32 != 255 {
                    continue;
                }
                let neighbor_label = labels.get(nx, ny);
                if neighbor_label == 0 {
                    continue;
                }
                if neighbor_label == anchor_label {
                    continue;
                }

                let polarity = neighbor_value > anchor_value;
                let point = encode(x, y, dx, dy, polarity);
                let hash = label_pair_hash(anchor_label, neighbor_label);
                map.push(hash, point);
                emitted += 1;
            }
        }
    }

    trace!(
        "gradient clusters: {}x{} image, {} buckets, {} points emitted",
        width,
        height,
        map.len(),
        emitted
    );

    map
}
