//! The bucketed map produced by gradient-cluster extraction.

use std::collections::HashMap;

/// A hash-map from label-pair hash to the sequence of gradient points
/// that share it, in scan order.
#[derive(Debug, Clone, Default)]
pub struct ClusterMap {
    buckets: HashMap<u32, Vec<u32>>,
    bucket_capacity: usize,
}

impl ClusterMap {
    /// An empty map. `bucket_capacity` is the initial `Vec` capacity
    /// reserved the first time a given hash is seen.
    pub fn new(bucket_capacity: usize) -> Self {
        Self {
            buckets: HashMap::new(),
            bucket_capacity,
        }
    }

    /// Append a point to the bucket for `hash`, creating it if absent.
    pub fn push(&mut self, hash: u32, point: u32) {
        let capacity = self.bucket_capacity;
        self.buckets
            .entry(hash)
            .or_insert_with(|| Vec::with_capacity(capacity))
            .push(point);
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Borrow a bucket's points, if the hash was ever seen.
    pub fn get(&self, hash: u32) -> Option<&[u32]> {
        self.buckets.get(&hash).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &Vec<u32>)> {
        self.buckets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&u32, &mut Vec<u32>)> {
        self.buckets.iter_mut()
    }

    /// Drop buckets for which `keep` returns `false`. Used by the
    /// fit-quads front end's size-based pruning pass.
    pub fn retain(&mut self, mut keep: impl FnMut(u32, &mut Vec<u32>) -> bool) {
        self.buckets.retain(|&hash, points| keep(hash, points));
    }

    /// Empty every bucket without freeing its backing storage, so the map
    /// can be reused across frames.
    pub fn clear(&mut self) {
        for points in self.buckets.values_mut() {
            points.clear();
        }
        self.buckets.retain(|_, points| points.capacity() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_groups_by_hash() {
        let mut map = ClusterMap::new(4);
        map.push(1, 100);
        map.push(1, 101);
        map.push(2, 200);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1), Some(&[100, 101][..]));
        assert_eq!(map.get(2), Some(&[200][..]));
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn retain_drops_filtered_buckets() {
        let mut map = ClusterMap::new(4);
        map.push(1, 10);
        map.push(2, 20);
        map.push(2, 21);
        map.retain(|_, points| points.len() > 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(2), Some(&[20, 21][..]));
    }
}
