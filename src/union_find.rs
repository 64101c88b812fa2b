//! Disjoint-set forest used to track the cycles of an implicit permutation.
//!
//! Unions are directed: `union(a, b)` always hangs the root of `a` under the
//! root of `b`. There is no rank balancing and `find` does not compress paths,
//! so `find` only needs `&self`. Only `size` entries at roots are meaningful.

#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// `n` singleton partitions `{0}, {1}, ..., {n-1}`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Root of the partition containing `x`.
    ///
    /// # Panics
    /// Panics if `x` is not below the `n` given to [`DisjointSet::new`].
    pub fn find(&self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Attaches the partition of `a` under the root of the partition of `b`.
    ///
    /// Returns `false` and leaves the forest untouched when both are already
    /// in the same partition.
    ///
    /// # Panics
    /// Panics if `a` or `b` is out of range.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        self.parent[root_a] = root_b;
        self.size[root_b] += self.size[root_a];
        true
    }

    /// Number of elements in the partition containing `x`.
    pub fn partition_size(&self, x: usize) -> usize {
        self.size[self.find(x)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots(ds: &DisjointSet, n: usize) -> usize {
        (0..n).filter(|&i| ds.find(i) == i).count()
    }

    #[test]
    fn test_new() {
        let ds = DisjointSet::new(5);
        assert_eq!(roots(&ds, 5), 5);
        for i in 0..5 {
            assert_eq!(ds.find(i), i);
            assert_eq!(ds.partition_size(i), 1);
        }
    }

    #[test]
    #[should_panic]
    fn test_find_out_of_range_panics() {
        DisjointSet::new(3).find(3);
    }

    #[test]
    fn test_union_is_directed() {
        let mut ds = DisjointSet::new(4);
        assert!(ds.union(3, 1));
        // 3's root now hangs under 1
        assert_eq!(ds.find(3), 1);
        assert_eq!(ds.find(1), 1);

        assert!(ds.union(1, 0));
        assert_eq!(ds.find(3), 0);
        assert_eq!(ds.find(1), 0);
    }

    #[test]
    fn test_size_accumulates_at_root() {
        let mut ds = DisjointSet::new(6);
        ds.union(5, 2);
        ds.union(4, 2);
        assert_eq!(ds.partition_size(5), 3);
        assert_eq!(ds.partition_size(2), 3);

        ds.union(2, 0);
        assert_eq!(ds.partition_size(4), 4);
        assert_eq!(ds.partition_size(0), 4);
        assert_eq!(ds.partition_size(1), 1);
        assert_eq!(roots(&ds, 6), 3);
    }

    #[test]
    fn test_union_same_partition_is_noop() {
        let mut ds = DisjointSet::new(3);
        assert!(!ds.union(2, 2));
        assert_eq!(ds.partition_size(2), 1);

        ds.union(2, 1);
        assert!(!ds.union(1, 2));
        assert_eq!(ds.partition_size(2), 2);
        assert_eq!(roots(&ds, 3), 2);
    }

    #[test]
    fn test_find_walks_long_chain() {
        let mut ds = DisjointSet::new(50);
        for i in (1..50).rev() {
            ds.union(i, i - 1);
        }
        assert_eq!(ds.find(49), 0);
        assert_eq!(ds.partition_size(49), 50);
        assert_eq!(roots(&ds, 50), 1);
    }
}
