//! Size-based bucket pruning — the first filter a cluster must survive
//! before a center and angular order are computed for it.

use tagedge_cluster::ClusterMap;

use crate::config::QuadConfig;

/// Discard every bucket whose point count falls outside
/// `[min_cluster_pixels, max_cluster_multiplier * 2 * (width + height)]`.
///
/// A typical boundary point is emitted twice (once from each endpoint's
/// viewpoint — see `tagedge-cluster`'s de-duplication rule), so the
/// maximum conceivable perimeter in point count is
/// `multiplier * 2 * (width + height)`.
pub fn prune_by_size(map: &mut ClusterMap, width: u32, height: u32, config: &QuadConfig) {
    let max_points =
        config.max_cluster_multiplier as usize * 2 * (width as usize + height as usize);
    let min_points = config.min_cluster_pixels as usize;
    map.retain(|_, points| points.len() >= min_points && points.len() <= max_points);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_too_small_and_too_large_buckets() {
        let mut map = ClusterMap::new(4);
        for i in 0..10 {
            map.push(1, i); // too small: 10 points
        }
        for i in 0..30 {
            map.push(2, i); // within bounds for a tiny image
        }
        for i in 0..10_000 {
            map.push(3, i); // absurdly large
        }
        let config = QuadConfig::default();
        prune_by_size(&mut map, 16, 16, &config);
        assert!(map.get(1).is_none());
        assert!(map.get(2).is_some());
        assert!(map.get(3).is_none());
    }
}
