//! tagedge-quad — fit-quads front end
//!
//! Takes the bucketed gradient-cluster map produced by `tagedge-cluster`
//! and prepares each surviving bucket for quadrilateral fitting: prune by
//! point count and bounding-box area, compute a dithered center, and sort
//! the bucket's points into angular order around it.

pub mod center;
pub mod config;
pub mod error;
pub mod prune;
pub mod sort;

pub use center::{Center, bounding_box, dithered_center};
pub use config::QuadConfig;
pub use error::{QuadError, QuadResult};
pub use prune::prune_by_size;
pub use sort::sort_by_angle;

use log::trace;
use tagedge_cluster::ClusterMap;

/// Run the full fit-quads front end over `map` in place: discard buckets
/// that fail the size filter, discard survivors whose bounding box is too
/// small to be a real tag boundary, then angularly sort each remaining
/// bucket's points around its dithered center.
pub fn prepare_for_fitting(map: &mut ClusterMap, width: u32, height: u32, config: &QuadConfig) {
    prune_by_size(map, width, height, config);

    let min_area = config.min_bbox_area;
    map.retain(|_, points| {
        let bbox = bounding_box(points.as_slice());
        bbox.area() >= min_area
    });

    let mut sorted = 0usize;
    for (_, points) in map.iter_mut() {
        let bbox = bounding_box(points.as_slice());
        let center = dithered_center(&bbox);
        sort_by_angle(points.as_mut_slice(), &center);
        sorted += 1;
    }

    trace!(
        "fit-quads front end: {}x{} image, {} clusters prepared for fitting",
        width, height, sorted
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagedge_cluster::point::encode;

    #[test]
    fn end_to_end_prunes_and_sorts_a_surviving_bucket() {
        let mut map = ClusterMap::new(32);
        // Build a ring of 30 points around a 20x20 doubled-coordinate
        // square boundary -- enough to survive both filters.
        let mut hash_points = Vec::new();
        for i in 0..30u32 {
            let angle = i as f32 / 30.0 * std::f32::consts::TAU;
            let x = (10.0 + 9.0 * angle.cos()).round().max(0.0) as u32;
            let y = (10.0 + 9.0 * angle.sin()).round().max(0.0) as u32;
            hash_points.push(encode(x, y, 0, 0, true));
        }
        for p in hash_points {
            map.push(1, p);
        }
        let config = QuadConfig::default();
        prepare_for_fitting(&mut map, 32, 32, &config);
        assert!(map.get(1).is_some());
        let points = map.get(1).unwrap();
        // Sorted ascending by key -- re-sorting should be a no-op.
        let mut resorted = points.to_vec();
        let bbox = bounding_box(&resorted);
        let center = dithered_center(&bbox);
        sort_by_angle(&mut resorted, &center);
        assert_eq!(points, &resorted[..]);
    }

    #[test]
    fn too_small_bucket_is_dropped_entirely() {
        let mut map = ClusterMap::new(32);
        for i in 0..5u32 {
            map.push(1, encode(i, i, 0, 0, true));
        }
        let config = QuadConfig::default();
        prepare_for_fitting(&mut map, 32, 32, &config);
        assert!(map.get(1).is_none());
    }
}
