//! Top-down single-pass deletion.
//!
//! The remover never backtracks: while descending toward the key it fixes
//! up any minimal node it is about to enter, so by the time a key leaves a
//! leaf, every node on the path (root excepted) can afford the loss and no
//! upward repair is needed.
//!
//! Fix-ups move keys around, including possibly the key being deleted (a
//! merge pulls its parent separator down). Every step therefore re-resolves
//! which node it is standing in, and the internal-node path re-verifies the
//! key's location after preparing the swap leaf, restarting from a fresh
//! lookup when a fix-up relocated it.

use crate::common::{Key, NodeId};

use super::BTreeIndex;

impl BTreeIndex {
    /// Remove `key`, keeping the tree balanced.
    ///
    /// Removing a key that is not present is a silent no-op.
    pub fn remove(&mut self, key: Key) {
        let Some(root) = self.root else {
            return;
        };

        let mut cur = root;
        loop {
            if self.node(cur).has_key(key) {
                self.remove_from_node(cur, key);
                return;
            }
            if self.node(cur).is_leaf() {
                // Ran out of tree: the key was never here.
                return;
            }
            let child = Self::descend_child(self.node(cur), key);
            cur = if self.is_minimal(child) {
                // May rotate into or merge away `child`; descend into
                // whatever node now covers its key range.
                self.fix_for_removal(child)
            } else {
                child
            };
        }
    }

    /// Delete `key` from `node_id`, which is known to contain it.
    ///
    /// Leaves lose the key directly. An internal node swaps the key with
    /// its in-order successor (or predecessor, when no right subtree
    /// exists) and deletes from that boundary leaf instead, fixing up
    /// minimal nodes on the way down to it.
    fn remove_from_node(&mut self, node_id: NodeId, key: Key) {
        let mut cur = node_id;
        loop {
            if self.node(cur).is_leaf() {
                self.remove_from_leaf(cur, key);
                return;
            }

            let slot = self
                .node(cur)
                .key_position(key)
                .expect("remove_from_node requires the containing node");
            let use_successor = slot + 1 < self.node(cur).children().len();
            let top = if use_successor { slot + 1 } else { slot };
            let leaf = self.descend_to_boundary(self.node(cur).children()[top], use_successor);

            // Fix-ups during the boundary descent may have merged the key
            // into a lower node, or collapsed `cur` away entirely.
            if !self.arena.is_live(cur) || !self.node(cur).has_key(key) {
                cur = self
                    .find(key)
                    .expect("a fix-up cannot drop a key from the tree");
                assert!(
                    self.node(cur).has_key(key),
                    "key {key} vanished during fix-up descent"
                );
                continue;
            }

            let boundary = {
                let keys = self.node(leaf).keys();
                if use_successor {
                    keys[0]
                } else {
                    *keys.last().expect("boundary leaf cannot be empty")
                }
            };
            let slot = self
                .node(cur)
                .key_position(key)
                .expect("key position rechecked above");
            self.arena.get_mut(cur).keys[slot] = boundary;
            self.remove_from_leaf(leaf, boundary);
            return;
        }
    }

    /// Walk to the in-order boundary leaf of the subtree at `top`:
    /// leftmost leaf when hunting a successor, rightmost for a predecessor.
    /// Minimal nodes along the way are fixed before being entered.
    fn descend_to_boundary(&mut self, top: NodeId, leftmost: bool) -> NodeId {
        let mut cur = top;
        loop {
            if self.is_minimal(cur) {
                cur = self.fix_for_removal(cur);
            }
            let node = self.node(cur);
            if node.is_leaf() {
                return cur;
            }
            cur = if leftmost {
                node.children()[0]
            } else {
                *node.children().last().expect("internal node has children")
            };
        }
    }

    /// Delete `key` from a leaf; destroy the root when its last key goes.
    fn remove_from_leaf(&mut self, leaf: NodeId, key: Key) {
        let node = self.arena.get_mut(leaf);
        let pos = node
            .key_position(key)
            .expect("leaf deletion requires the key");
        node.keys.remove(pos);

        if self.root == Some(leaf) && self.node(leaf).num_keys() == 0 {
            // The empty tree is an absent root, not an empty node.
            self.arena.free(leaf);
            self.root = None;
        }
    }
}
