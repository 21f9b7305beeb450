//! Overflow repair: node splitting and upward median propagation.
//!
//! A split partitions an overfull node around its lower median: the node
//! keeps the keys below the median, a new right sibling takes the keys
//! above it, and the median moves into the parent between the two. The
//! parent may overflow in turn, so propagation walks parent links in an
//! explicit loop; splitting the root creates a fresh root and is the only
//! way the tree gains height.

use crate::common::{Key, NodeId};

use super::node::Node;
use super::BTreeIndex;

impl BTreeIndex {
    /// Repair `node_id` after an insert pushed it one key over capacity,
    /// propagating upward until every ancestor is within capacity again.
    pub(crate) fn split(&mut self, node_id: NodeId) {
        let mut cur = node_id;
        loop {
            let (median, sibling) = self.split_node(cur);
            let parent = match self.parent_of(cur) {
                Some(parent) => parent,
                None => self.grow_root(cur),
            };
            self.arena.get_mut(sibling).parent = parent;
            self.insert_into_parent(parent, cur, median, sibling);
            self.stats.splits += 1;

            if self.arena.get(parent).num_keys() > self.max_keys() {
                cur = parent;
            } else {
                return;
            }
        }
    }

    /// Detach the upper half of `node_id` into a new sibling.
    ///
    /// Returns the promoted median key and the sibling's id. The sibling is
    /// a leaf iff the split node is; moved children are re-parented.
    fn split_node(&mut self, node_id: NodeId) -> (Key, NodeId) {
        let node = self.arena.get_mut(node_id);
        assert_eq!(
            node.num_keys(),
            self.order,
            "split requires a node exactly one key over capacity"
        );
        let median_index = (node.num_keys() - 1) / 2;

        let high_keys = node.keys.split_off(median_index + 1);
        let median = node.keys.pop().expect("overfull node has a median");
        let high_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(median_index + 1)
        };

        let sibling = self.arena.alloc(Node {
            keys: high_keys,
            children: high_children,
            parent: NodeId::INVALID,
        });
        let moved = self.arena.get(sibling).children.clone();
        for child in moved {
            self.arena.get_mut(child).parent = sibling;
        }
        (median, sibling)
    }

    /// Replace the root with a keyless node over `old_root`.
    ///
    /// The caller immediately inserts the promoted median and the new
    /// sibling, restoring the one-more-child-than-keys shape.
    fn grow_root(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self.arena.alloc(Node::root_over(old_root));
        self.arena.get_mut(old_root).parent = new_root;
        self.root = Some(new_root);
        self.stats.root_splits += 1;
        new_root
    }

    /// Splice `median` and the new `sibling` into `parent`, just right of
    /// the slot holding the split node `left`.
    fn insert_into_parent(&mut self, parent: NodeId, left: NodeId, median: Key, sibling: NodeId) {
        let node = self.arena.get_mut(parent);
        let pos = node
            .keys
            .iter()
            .position(|&k| k > median)
            .unwrap_or(node.keys.len());
        debug_assert_eq!(
            node.children[pos], left,
            "median insertion point does not adjoin the split node"
        );
        node.keys.insert(pos, median);
        node.children.insert(pos + 1, sibling);
    }
}
