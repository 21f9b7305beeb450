//! Read-only tree descent: lookup, child selection, siblings.
//!
//! Every traversal in the crate funnels through the descent rule here: scan
//! a node's keys left to right, stop on equality, otherwise follow the
//! first child whose following key exceeds the probe, defaulting to the
//! last child.

use crate::common::{Key, NodeId};

use super::node::Node;
use super::BTreeIndex;

/// Which neighbor of a node to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl BTreeIndex {
    /// Locate `key`, or where it would be inserted.
    ///
    /// Returns the node that currently contains `key`, or if absent, the
    /// leaf an insert would place it in. `None` only for the empty tree.
    ///
    /// The returned id stays valid until the next `insert`/`remove` call;
    /// probe the node with [`Node::has_key`] to distinguish a hit from an
    /// insertion point.
    pub fn find(&self, key: Key) -> Option<NodeId> {
        let mut cur = self.root?;
        loop {
            let node = self.node(cur);
            if node.has_key(key) || node.is_leaf() {
                return Some(cur);
            }
            cur = Self::descend_child(node, key);
        }
    }

    /// The child of `node` whose subtree covers `key`.
    ///
    /// Only meaningful when `node` is internal and does not contain `key`.
    pub(crate) fn descend_child(node: &Node, key: Key) -> NodeId {
        let slot = node
            .keys()
            .iter()
            .position(|&k| key < k)
            .unwrap_or(node.num_keys());
        node.children()[slot]
    }

    /// The parent of `id`, or None for the root.
    #[inline]
    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent;
        parent.is_valid().then_some(parent)
    }

    /// The slot of `child` among `parent`'s children.
    ///
    /// # Panics
    /// Panics if `child` is not a child of `parent`; that means a parent
    /// link went stale, which is corruption, not a recoverable state.
    pub(crate) fn child_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.node(parent)
            .children()
            .iter()
            .position(|&c| c == child)
            .unwrap_or_else(|| panic!("{child} missing from child slots of {parent}"))
    }

    /// The node immediately left or right of `id` under the same parent.
    ///
    /// None when `id` is the root or sits at the relevant end of its
    /// parent's child array.
    pub(crate) fn sibling_of(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let slot = self.child_index(parent, id);
        let children = self.node(parent).children();
        match side {
            Side::Left => (slot > 0).then(|| children[slot - 1]),
            Side::Right => children.get(slot + 1).copied(),
        }
    }
}
