//! B-tree index implementation.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BTreeIndex                            │
//! │  ┌──────────────┐  ┌────────────────────────────────────┐   │
//! │  │ root         │  │     arena: NodeArena               │   │
//! │  │ Option<NodeId>│─▶│  [Node0] [Node1] [Node2] ...      │   │
//! │  └──────────────┘  └────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐                         │
//! │  │ order        │  │ stats        │                         │
//! │  │ usize        │  │ BTreeStats   │                         │
//! │  └──────────────┘  └──────────────┘                         │
//! └──────────────────────────────────────────────────────────────┘
//!          │ descent (search)      │ repair
//!          ▼                       ▼
//!   find / insert / remove   split / rotate / merge
//! ```
//!
//! The operations are split across submodules by concern:
//! - `node` / `arena` - storage: the node layout and the slab owning it
//! - `search` - read-only descent: `find`, child selection, siblings
//! - `insert` - insertion orchestration
//! - `split` - overflow repair (median promotion, upward propagation)
//! - `balance` - underflow repair (rotation, merge, root collapse)
//! - `remove` - top-down single-pass deletion
//! - `display` - pure level-by-level formatting
//! - `stats` - structural event counters

mod arena;
mod balance;
mod display;
mod insert;
mod node;
mod remove;
mod search;
mod split;
mod stats;

pub use node::Node;
pub use stats::BTreeStats;

use crate::common::config::{DEFAULT_ORDER, MIN_ORDER};
use crate::common::{Error, Key, NodeId, Result};

use arena::NodeArena;

/// An in-memory fixed-order B-tree over unique integer keys.
///
/// The order (maximum children per internal node) is fixed at construction.
/// All nodes live in an internal arena and are addressed by [`NodeId`];
/// [`find`](Self::find) hands out ids that can be inspected through
/// [`node`](Self::node).
///
/// Duplicate inserts and absent-key removes are silent no-ops, so the
/// mutation API is infallible. The tree assumes exclusive ownership by its
/// caller: all mutation goes through `&mut self` and nothing inside locks.
///
/// # Example
/// ```
/// use arbordb::BTreeIndex;
///
/// let mut tree = BTreeIndex::new(4).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key);
/// }
/// assert!(tree.contains(12));
/// assert_eq!(tree.count_keys(), 8);
///
/// tree.remove(12);
/// assert!(!tree.contains(12));
/// ```
#[derive(Debug)]
pub struct BTreeIndex {
    /// Slot storage owning every node.
    arena: NodeArena,

    /// The root node, or None for the empty tree.
    root: Option<NodeId>,

    /// Maximum number of children per internal node.
    order: usize,

    /// Structural event counters.
    stats: BTreeStats,
}

impl BTreeIndex {
    /// Create an empty tree of the given order.
    ///
    /// Returns [`Error::InvalidOrder`] if `order < MIN_ORDER`.
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder(order));
        }
        Ok(Self {
            arena: NodeArena::new(),
            root: None,
            order,
            stats: BTreeStats::new(),
        })
    }

    /// Maximum number of children per internal node.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Largest number of keys a node may hold: `order - 1`.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.order - 1
    }

    /// Smallest number of keys a non-root node may hold.
    ///
    /// `order / 2 - 1`, the textbook `ceil(order / 2) - 1` for every even
    /// order. The top-down deletion pass merges two minimum nodes plus a
    /// separator into one, which must fit in `order - 1` keys; this is the
    /// largest minimum for which that holds at odd orders too.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.order / 2 - 1
    }

    /// Borrow the node behind an id returned by [`find`](Self::find).
    ///
    /// # Panics
    /// Panics if `id` no longer names a live node. Ids are invalidated by
    /// the structural changes of later `insert`/`remove` calls.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: Key) -> bool {
        self.find(key)
            .is_some_and(|id| self.node(id).has_key(key))
    }

    /// Total number of live nodes, by traversal. 0 for the empty tree.
    pub fn count_nodes(&self) -> usize {
        fn walk(tree: &BTreeIndex, id: NodeId) -> usize {
            let node = tree.node(id);
            1 + node
                .children()
                .iter()
                .map(|&child| walk(tree, child))
                .sum::<usize>()
        }
        self.root.map_or(0, |root| walk(self, root))
    }

    /// Total number of keys, by traversal. 0 for the empty tree.
    pub fn count_keys(&self) -> usize {
        fn walk(tree: &BTreeIndex, id: NodeId) -> usize {
            let node = tree.node(id);
            node.num_keys()
                + node
                    .children()
                    .iter()
                    .map(|&child| walk(tree, child))
                    .sum::<usize>()
        }
        self.root.map_or(0, |root| walk(self, root))
    }

    /// Number of keys stored (same as [`count_keys`](Self::count_keys)).
    #[inline]
    pub fn len(&self) -> usize {
        self.count_keys()
    }

    /// Whether the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 for the empty tree, 1 for a lone root leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            height += 1;
            cur = self.node(id).children().first().copied();
        }
        height
    }

    /// Every key in ascending order.
    ///
    /// A diagnostic for tests and debugging, not a range-scan API: it
    /// materializes the whole key set.
    pub fn keys_in_order(&self) -> Vec<Key> {
        fn walk(tree: &BTreeIndex, id: NodeId, out: &mut Vec<Key>) {
            let node = tree.node(id);
            if node.is_leaf() {
                out.extend_from_slice(node.keys());
                return;
            }
            for i in 0..node.num_keys() {
                walk(tree, node.children()[i], out);
                out.push(node.keys()[i]);
            }
            if let Some(&last) = node.children().last() {
                walk(tree, last, out);
            }
        }
        let mut out = Vec::new();
        if let Some(root) = self.root {
            walk(self, root, &mut out);
        }
        out
    }

    /// Structural event counters.
    #[inline]
    pub fn stats(&self) -> &BTreeStats {
        &self.stats
    }

    /// Reset the structural event counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Drop every node, leaving the empty tree. Counters are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Verify every balance and ordering invariant, panicking on violation.
    ///
    /// A debugging aid for tests: an undetected invariant break corrupts
    /// the tree permanently, so violations fail fast rather than propagate.
    /// Checks, for every reachable node:
    /// - keys strictly ascending and inside the parent's open key bounds
    /// - key count within `[min_keys, max_keys]` (root exempt from the
    ///   minimum, but never empty at rest)
    /// - internal nodes have exactly `num_keys + 1` children
    /// - child parent links point back at the owning node
    /// - all leaves at the same depth
    /// - the arena holds exactly the reachable nodes
    pub fn check_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(
                self.arena.len(),
                0,
                "empty tree must not retain arena nodes"
            );
            return;
        };
        assert!(
            !self.node(root).parent.is_valid(),
            "root has a parent link"
        );
        assert!(
            self.node(root).num_keys() >= 1,
            "non-empty tree has a keyless root"
        );
        let mut leaf_depth = None;
        self.check_node(root, None, None, 0, &mut leaf_depth);
        assert_eq!(
            self.count_nodes(),
            self.arena.len(),
            "arena holds unreachable nodes"
        );
    }

    fn check_node(
        &self,
        id: NodeId,
        lo: Option<Key>,
        hi: Option<Key>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) {
        let node = self.node(id);
        let is_root = self.root == Some(id);

        assert!(
            node.num_keys() <= self.max_keys(),
            "{id} holds {} keys, over capacity {}",
            node.num_keys(),
            self.max_keys()
        );
        if !is_root {
            assert!(
                node.num_keys() >= self.min_keys(),
                "{id} holds {} keys, under minimum {}",
                node.num_keys(),
                self.min_keys()
            );
        }

        for pair in node.keys().windows(2) {
            assert!(pair[0] < pair[1], "{id} keys not strictly ascending");
        }
        if let (Some(lo), Some(&first)) = (lo, node.keys().first()) {
            assert!(first > lo, "{id} key {first} escapes lower bound {lo}");
        }
        if let (Some(hi), Some(&last)) = (hi, node.keys().last()) {
            assert!(last < hi, "{id} key {last} escapes upper bound {hi}");
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) => {
                    assert_eq!(expected, depth, "leaf {id} at depth {depth}, expected {expected}")
                }
            }
            return;
        }

        assert_eq!(
            node.children().len(),
            node.num_keys() + 1,
            "{id} child count does not match key count"
        );
        for (i, &child) in node.children().iter().enumerate() {
            assert_eq!(
                self.node(child).parent,
                id,
                "{child} has a stale parent link"
            );
            let child_lo = if i == 0 { lo } else { Some(node.keys()[i - 1]) };
            let child_hi = node.keys().get(i).copied().or(hi);
            self.check_node(child, child_lo, child_hi, depth + 1, leaf_depth);
        }
    }
}

impl Default for BTreeIndex {
    /// An empty tree of [`DEFAULT_ORDER`].
    fn default() -> Self {
        Self::new(DEFAULT_ORDER).expect("DEFAULT_ORDER is valid")
    }
}
