//! B-tree operation statistics tracking.

/// Counters for the structural events of a tree's lifetime.
///
/// The tree is a single-threaded resource mutated through `&mut self`, so
/// plain integers suffice; there is no concurrent reader to race with.
///
/// # Example
/// ```
/// use arbordb::BTreeIndex;
///
/// let mut tree = BTreeIndex::new(4).unwrap();
/// for key in [10, 20, 5, 6] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.stats().splits, 1);
/// assert_eq!(tree.stats().root_splits, 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BTreeStats {
    /// Number of node splits (root splits included).
    pub splits: u64,

    /// Number of node merges (root collapses included).
    pub merges: u64,

    /// Number of key rotations through a parent.
    pub rotations: u64,

    /// Number of splits that created a new root (tree height + 1).
    pub root_splits: u64,

    /// Number of merges that collapsed the root away (tree height - 1).
    pub root_collapses: u64,
}

impl BTreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = BTreeStats::new();
        assert_eq!(stats.splits, 0);
        assert_eq!(stats.merges, 0);
        assert_eq!(stats.rotations, 0);
    }

    #[test]
    fn test_reset() {
        let mut stats = BTreeStats::new();
        stats.splits = 3;
        stats.rotations = 1;
        stats.reset();
        assert_eq!(stats, BTreeStats::new());
    }
}
