//! Insertion orchestration.
//!
//! Insertion itself is small: bootstrap the root on first use, descend to
//! the target node, place the key in sorted position, and hand overfull
//! nodes to the splitter.

use crate::common::Key;

use super::node::Node;
use super::BTreeIndex;

impl BTreeIndex {
    /// Insert `key`, keeping the tree balanced.
    ///
    /// Inserting a key that is already present is a silent no-op: the tree
    /// stores each key once, and re-asserting membership is not an error.
    pub fn insert(&mut self, key: Key) {
        if self.root.is_none() {
            let root = self.arena.alloc(Node::leaf_with_key(key));
            self.root = Some(root);
            return;
        }

        let target = self
            .find(key)
            .expect("a non-empty tree always yields a target node");

        let max_keys = self.max_keys();
        let node = self.arena.get_mut(target);
        if node.has_key(key) {
            return;
        }
        node.insert_key_sorted(key);

        if node.num_keys() > max_keys {
            self.split(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_creates_root_leaf() {
        let mut tree = BTreeIndex::new(4).unwrap();
        tree.insert(42);

        let root = tree.root.unwrap();
        assert!(tree.node(root).is_leaf());
        assert_eq!(tree.node(root).keys(), &[42]);
        tree.check_invariants();
    }

    #[test]
    fn test_inserts_stay_sorted_in_leaf() {
        let mut tree = BTreeIndex::new(6).unwrap();
        for key in [9, 1, 5, 3, 7] {
            tree.insert(key);
        }
        let root = tree.root.unwrap();
        assert_eq!(tree.node(root).keys(), &[1, 3, 5, 7, 9]);
        tree.check_invariants();
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut tree = BTreeIndex::new(4).unwrap();
        for key in [10, 20, 5] {
            tree.insert(key);
        }
        tree.insert(20);
        assert_eq!(tree.count_keys(), 3);
        assert_eq!(tree.keys_in_order(), vec![5, 10, 20]);
        tree.check_invariants();
    }

    #[test]
    fn test_overflow_triggers_split() {
        let mut tree = BTreeIndex::new(4).unwrap();
        for key in [10, 20, 5, 6] {
            tree.insert(key);
        }
        assert_eq!(tree.stats().splits, 1);
        assert_eq!(tree.count_nodes(), 3);
        tree.check_invariants();
    }

    #[test]
    fn test_many_inserts_all_reachable() {
        let mut tree = BTreeIndex::new(5).unwrap();
        for key in 0..200 {
            tree.insert(key * 3);
            tree.check_invariants();
        }
        for key in 0..200 {
            assert!(tree.contains(key * 3), "lost key {}", key * 3);
            assert!(!tree.contains(key * 3 + 1));
        }
        assert_eq!(tree.count_keys(), 200);
    }
}
