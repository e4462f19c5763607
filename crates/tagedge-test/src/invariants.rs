//! Shared invariant checkers for the CCL and gradient-cluster stages,
//! written once so every crate's test suite can assert the same contract.

use std::collections::HashSet;

use tagedge_cluster::ClusterMap;
use tagedge_cluster::point::decode;
use tagedge_core::{DisjointSet, LabelImage, ThresholdedImage};

/// Check the core connected-component labeling invariants:
///
/// - 8-connected same-polarity pixels share a label.
/// - 4-connected opposite-polarity pixels never share a label.
/// - the sum of `ds`'s population counts equals the number of labeled
///   (nonzero) pixels.
///
/// `ds` must already be flattened (final, post-flatten label ids).
///
/// # Panics
///
/// Panics with a descriptive message on the first violation found.
pub fn assert_ccl_invariants(labels: &LabelImage, thresholded: &ThresholdedImage, ds: &DisjointSet) {
    let width = labels.width();
    let height = labels.height();

    for y in 0..height {
        for x in 0..width {
            let label = labels.get(x, y);
            if label == 0 {
                continue;
            }
            let value = thresholded.get_pixel(x, y).unwrap();

            // 8-connectivity: same-polarity neighbors (including
            // diagonals) must share this pixel's label.
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                    if nx < 0 || ny < 0 || nx as u32 >= width || ny as u32 >= height {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    let neighbor_value = thresholded.get_pixel(nx, ny).unwrap();
                    let neighbor_label = labels.get(nx, ny);
                    if same_polarity(value, neighbor_value) && neighbor_label != 0 {
                        assert_eq!(
                            label,
                            neighbor_label,
                            "8-connected same-polarity pixels ({x},{y}) and ({nx},{ny}) carry different labels"
                        );
                    }
                }
            }

            // 4-connectivity: opposite-polarity neighbors must never
            // share this pixel's label.
            for &(dx, dy) in &[(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if nx < 0 || ny < 0 || nx as u32 >= width || ny as u32 >= height {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                let neighbor_value = thresholded.get_pixel(nx, ny).unwrap();
                let neighbor_label = labels.get(nx, ny);
                if !same_polarity(value, neighbor_value) && neighbor_label != 0 {
                    assert_ne!(
                        label,
                        neighbor_label,
                        "4-connected opposite-polarity pixels ({x},{y}) and ({nx},{ny}) share a label"
                    );
                }
            }
        }
    }

    let labeled_pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| labels.get(x, y) != 0)
        .count() as u64;
    let counted: u64 = (1..ds.len() as u32).map(|l| ds.count(l) as u64).sum();
    assert_eq!(
        counted, labeled_pixels,
        "sum of label_count[] must equal the number of labeled pixels"
    );
}

/// Two pixel values are "same polarity" if both are white (255) or both
/// are black (0). Ambiguous (127) pixels are never labeled, so this is
/// only ever evaluated on values that originated from a labeled pixel.
fn same_polarity(a: u8, b: u8) -> bool {
    (a == 255 && b == 255) || (a == 0 && b == 0)
}

/// Check the core gradient-cluster extraction invariants over a single
/// bucket:
///
/// - every point's position falls within `(width, height)`.
/// - no two points in the bucket share the same `(x, y, dx, dy)` tuple.
///
/// # Panics
///
/// Panics with a descriptive message on the first violation found.
pub fn assert_cluster_invariants(points: &[u32], width: u32, height: u32) {
    let mut seen = HashSet::new();
    for &point in points {
        let (sub_x, sub_y, dx, dy, _polarity) = decode(point);
        // sub_x/sub_y are 2*anchor_x+dx / 2*anchor_y+dy; recover the anchor.
        let anchor_x = (sub_x as i32 - dx) / 2;
        let anchor_y = (sub_y as i32 - dy) / 2;
        assert!(
            anchor_x >= 0 && (anchor_x as u32) < width,
            "point anchor x={anchor_x} out of bounds for width={width}"
        );
        assert!(
            anchor_y >= 0 && (anchor_y as u32) < height,
            "point anchor y={anchor_y} out of bounds for height={height}"
        );
        assert!(
            seen.insert((sub_x, sub_y, dx, dy)),
            "duplicate point (x={sub_x}, y={sub_y}, dx={dx}, dy={dy}) in the same bucket"
        );
    }
}

/// Check that every bucket in `map` satisfies [`assert_cluster_invariants`].
pub fn assert_all_cluster_invariants(map: &ClusterMap, width: u32, height: u32) {
    for (_, points) in map.iter() {
        assert_cluster_invariants(points, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagedge_cluster::point::encode;

    #[test]
    fn duplicate_points_trip_the_assertion() {
        let points = vec![encode(1, 1, 1, 0, true), encode(1, 1, 1, 0, false)];
        let result = std::panic::catch_unwind(|| assert_cluster_invariants(&points, 16, 16));
        assert!(result.is_err());
    }

    #[test]
    fn distinct_points_pass() {
        let points = vec![encode(1, 1, 1, 0, true), encode(2, 2, 0, 1, false)];
        assert_cluster_invariants(&points, 16, 16);
    }
}
