//! Underflow repair: rotation, merging, root collapse.
//!
//! The deletion pass never lets itself descend into a node that could not
//! afford to lose a key. [`BTreeIndex::fix_for_removal`] is called on such
//! minimal nodes first and restores slack either by rotating a key in from
//! a sibling with keys to spare, or by merging with a sibling around the
//! parent's separating key. A merge that drains the root's last separator
//! collapses the root away; that is the only way the tree loses height.

use crate::common::NodeId;

use super::search::Side;
use super::BTreeIndex;

impl BTreeIndex {
    /// Whether `id` is at (or below) the minimum key count, i.e. unable to
    /// give up a key without violating the occupancy invariant.
    #[inline]
    pub(crate) fn is_minimal(&self, id: NodeId) -> bool {
        self.node(id).num_keys() <= self.min_keys()
    }

    /// Give a minimal non-root node room to lose a key.
    ///
    /// Returns the id of the node occupying the repaired position
    /// afterwards: the node itself after a rotation, or the surviving
    /// lower-indexed node after a merge. Callers must continue their
    /// descent through the returned id; the original may be gone.
    ///
    /// Calling this on the root is a no-op (root minimality is never
    /// enforced).
    pub(crate) fn fix_for_removal(&mut self, node_id: NodeId) -> NodeId {
        let Some(parent) = self.parent_of(node_id) else {
            return node_id;
        };

        let prev = self.sibling_of(node_id, Side::Left);
        let next = self.sibling_of(node_id, Side::Right);
        let prev_rich = prev.filter(|&p| !self.is_minimal(p));
        let next_rich = next.filter(|&n| !self.is_minimal(n));

        match (prev_rich, next_rich) {
            (Some(p), Some(n)) => {
                // Both siblings can donate; take from the richer one.
                if self.node(p).num_keys() >= self.node(n).num_keys() {
                    self.rotate_from_left(parent, p, node_id);
                } else {
                    self.rotate_from_right(parent, node_id, n);
                }
                node_id
            }
            (Some(p), None) => {
                self.rotate_from_left(parent, p, node_id);
                node_id
            }
            (None, Some(n)) => {
                self.rotate_from_right(parent, node_id, n);
                node_id
            }
            (None, None) => {
                // Every existing sibling is minimal: merge instead.
                if let Some(n) = next {
                    self.merge(parent, node_id, n)
                } else if let Some(p) = prev {
                    self.merge(parent, p, node_id)
                } else {
                    panic!("non-root {node_id} has no siblings; parent {parent} is malformed")
                }
            }
        }
    }

    /// Move the rightmost key of `donor` through `parent` into `node`.
    ///
    /// The parent's separating key drops into the front of `node` and the
    /// donor's last key replaces it; for internal nodes the donor's last
    /// child travels along.
    fn rotate_from_left(&mut self, parent: NodeId, donor: NodeId, node_id: NodeId) {
        let sep_index = self.child_index(parent, node_id) - 1;

        let donor_node = self.arena.get_mut(donor);
        let donated_key = donor_node.keys.pop().expect("donor sibling has a spare key");
        let donated_child = donor_node.children.pop();

        let separator =
            std::mem::replace(&mut self.arena.get_mut(parent).keys[sep_index], donated_key);

        let node = self.arena.get_mut(node_id);
        node.keys.insert(0, separator);
        if let Some(child) = donated_child {
            node.children.insert(0, child);
            self.arena.get_mut(child).parent = node_id;
        }
        self.stats.rotations += 1;
    }

    /// Move the leftmost key of `donor` through `parent` into `node`.
    ///
    /// Mirror image of [`rotate_from_left`](Self::rotate_from_left).
    fn rotate_from_right(&mut self, parent: NodeId, node_id: NodeId, donor: NodeId) {
        let sep_index = self.child_index(parent, node_id);

        let donor_node = self.arena.get_mut(donor);
        let donated_key = donor_node.keys.remove(0);
        let donated_child = if donor_node.is_leaf() {
            None
        } else {
            Some(donor_node.children.remove(0))
        };

        let separator =
            std::mem::replace(&mut self.arena.get_mut(parent).keys[sep_index], donated_key);

        let node = self.arena.get_mut(node_id);
        node.keys.push(separator);
        if let Some(child) = donated_child {
            node.children.push(child);
            self.arena.get_mut(child).parent = node_id;
        }
        self.stats.rotations += 1;
    }

    /// Combine `left`, the separating parent key, and `right` into `left`,
    /// retiring `right`. Collapses the root when the merge drains its last
    /// key. Returns the surviving node.
    fn merge(&mut self, parent: NodeId, left: NodeId, right: NodeId) -> NodeId {
        let sep_index = self.child_index(parent, left);
        debug_assert_eq!(
            self.child_index(parent, right),
            sep_index + 1,
            "merge partners must be adjacent"
        );

        let parent_node = self.arena.get_mut(parent);
        let separator = parent_node.keys.remove(sep_index);
        parent_node.children.remove(sep_index + 1);

        let max_keys = self.max_keys();
        let retired = self.arena.free(right);
        let left_node = self.arena.get_mut(left);
        left_node.keys.push(separator);
        left_node.keys.extend(retired.keys);
        left_node.children.extend(retired.children.iter().copied());
        debug_assert!(
            left_node.num_keys() <= max_keys,
            "merged node exceeds capacity"
        );
        for &child in &retired.children {
            self.arena.get_mut(child).parent = left;
        }
        self.stats.merges += 1;

        if self.root == Some(parent) && self.node(parent).num_keys() == 0 {
            // The root gave up its last separator: the merged node is the
            // whole tree one level down.
            self.arena.free(parent);
            self.arena.get_mut(left).parent = NodeId::INVALID;
            self.root = Some(left);
            self.stats.root_collapses += 1;
        }
        left
    }
}
