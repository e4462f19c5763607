//! Disjoint-set (union-find) over label ids, augmented with population
//! counts.
//!
//! The union-find merges by choosing the smaller index as the surviving
//! root. This is load-bearing: `flatten()`'s single ascending pass over
//! `tree` relies on every non-root entry pointing to a strictly smaller
//! index, and the CCL writeback path assumes the root is always the
//! minimum label id in its equivalence class. Do not swap to a
//! rank-heuristic variant without auditing both.

/// Union-find with lazy per-label population counters.
///
/// `tree[i] <= i` always holds; `tree[i] == i` iff `i` is a root. After
/// [`flatten`](Self::flatten), `tree` instead maps every original label id
/// to its dense, 1-based final id — `get_label` and `count` are only
/// meaningful for ids *issued before* the flatten that produced the ids
/// they return.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    tree: Vec<u32>,
    counts: Vec<u32>,
}

impl DisjointSet {
    /// Allocate storage for up to `capacity` labels (including label `0`,
    /// which callers conventionally reserve for background).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Vec::with_capacity(capacity),
            counts: vec![0; capacity],
        }
    }

    /// Discard all issued labels, keeping the backing allocation for reuse
    /// across frames (buffers are front-loaded at construction).
    pub fn reset(&mut self) {
        self.tree.clear();
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// Number of labels issued so far (including label `0`).
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Issue a fresh label, initially its own root.
    ///
    /// # Panics
    ///
    /// Panics if more labels are issued than the capacity passed to
    /// [`with_capacity`](Self::with_capacity) — a tight bound; see the
    /// CCL stage for the worst-case sizing formula.
    pub fn new_label(&mut self) -> u32 {
        let id = self.tree.len() as u32;
        assert!(
            (id as usize) < self.counts.len(),
            "DisjointSet capacity exceeded: more labels issued than reserved"
        );
        self.tree.push(id);
        id
    }

    /// Current mapping of `index` — its parent before `flatten`, or its
    /// dense final label after.
    #[inline]
    pub fn get_label(&self, index: u32) -> u32 {
        self.tree[index as usize]
    }

    /// Find the root of `x`'s equivalence class.
    pub fn find_root(&self, mut x: u32) -> u32 {
        while self.tree[x as usize] < x {
            x = self.tree[x as usize];
        }
        x
    }

    /// Merge the equivalence classes of `i` and `j`, returning the
    /// surviving (smaller) root.
    pub fn merge(&mut self, i: u32, j: u32) -> u32 {
        let ri = self.find_root(i);
        let rj = self.find_root(j);
        if ri < rj {
            self.tree[rj as usize] = ri;
            ri
        } else if rj < ri {
            self.tree[ri as usize] = rj;
            rj
        } else {
            ri
        }
    }

    /// Compress every issued label to a dense range starting at `1`
    /// (label `0` is conventionally background and is left unmapped here;
    /// callers that issue it as a real label get it mapped to `0` too,
    /// since index `0` is always its own root).
    ///
    /// Returns the number of distinct labels, i.e. one past the highest
    /// dense id assigned.
    pub fn flatten(&mut self) -> u32 {
        let mut next = 1u32;
        for i in 1..self.tree.len() {
            if self.tree[i] < i as u32 {
                self.tree[i] = self.tree[self.tree[i] as usize];
            } else {
                self.tree[i] = next;
                next += 1;
            }
        }
        next
    }

    /// Increment the population counter for `label` (a *final*, post-flatten
    /// id). Called lazily by the CCL writeback phase; the order in which
    /// different labels are incremented is not observable, only the final
    /// counts.
    #[inline]
    pub fn increment_count(&mut self, label: u32) {
        self.counts[label as usize] += 1;
    }

    /// Population of `label` (a final, post-flatten id).
    #[inline]
    pub fn count(&self, label: u32) -> u32 {
        self.counts[label as usize]
    }
}
