//! arbordb - an in-memory B-tree index with classic rebalancing.
//!
//! # Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          arbordb                               │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────────┐   │
//! │  │            Index Layer (index/btree)                    │   │
//! │  │   BTreeIndex: find / insert / remove / diagnostics      │   │
//! │  │  ┌──────────────────────────────────────────────────┐  │   │
//! │  │  │  search → descent & siblings                      │  │   │
//! │  │  │  split  → overflow repair (median promotion)      │  │   │
//! │  │  │  balance → underflow repair (rotate | merge)      │  │   │
//! │  │  │  remove → top-down preemptive deletion            │  │   │
//! │  │  └──────────────────────────────────────────────────┘  │   │
//! │  │         Node arena: slot table + free list              │   │
//! │  └────────────────────────────────────────────────────────┘   │
//! │                              ↓                                 │
//! │  ┌────────────────────────────────────────────────────────┐   │
//! │  │        Common primitives (common/)                      │   │
//! │  │      NodeId + Key + Error + config constants            │   │
//! │  └────────────────────────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree keeps every node within `[min_keys, max_keys]` occupancy, all
//! leaves at the same depth, and keys in strict search-tree order. Inserts
//! repair overflow by splitting around the lower median and promoting it;
//! removes run a single top-down pass that rotates or merges any minimal
//! node before descending into it, so no operation ever backtracks.
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Key, Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use arbordb::BTreeIndex;
//!
//! let mut tree = BTreeIndex::new(4).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.contains(17));
//! assert_eq!(tree.count_keys(), 8);
//!
//! tree.remove(20);
//! assert!(!tree.contains(20));
//! ```
//!
//! # Scope
//! Single-threaded by design: the tree is one mutable resource owned by
//! its caller, mutation goes through `&mut self`, and the crate performs
//! no locking. There is no persistence and no range-scan API.

// Core modules
pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, Key, NodeId, Result};

pub use index::btree::{BTreeIndex, BTreeStats, Node};
