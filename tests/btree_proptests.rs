//! Property-based tests for the B-tree index.
//!
//! These verify invariants and properties that should hold for all inputs.
//! Uses differential testing against `BTreeSet` as an oracle: after every
//! operation the tree must agree with the set on membership and cardinality
//! and pass its own structural invariant check.

use std::collections::BTreeSet;

use arbordb::BTreeIndex;
use proptest::prelude::*;

/// Key range kept deliberately narrow so sequences collide often,
/// exercising the duplicate-insert and absent-remove no-ops.
const KEY_RANGE: std::ops::RangeInclusive<i64> = -200..=200;

// ============================================================================
//  Strategies
// ============================================================================

/// Strategy for a valid tree order.
fn order() -> impl Strategy<Value = usize> {
    3usize..=16
}

/// Strategy for a batch of (possibly repeating) keys.
fn keys(max_count: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(KEY_RANGE, 0..=max_count)
}

/// Strategy for a set of distinct keys.
fn unique_keys(max_count: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(KEY_RANGE, 0..=max_count)
        .prop_map(|set| set.into_iter().collect())
}

/// Operations for random testing.
#[derive(Debug, Clone)]
enum Op {
    Insert(i64),
    Remove(i64),
    Contains(i64),
}

/// Strategy for generating random operation sequences, insert-heavy so
/// trees actually grow before shrinking.
fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => KEY_RANGE.prop_map(Op::Insert),
            2 => KEY_RANGE.prop_map(Op::Remove),
            1 => KEY_RANGE.prop_map(Op::Contains),
        ],
        0..=max_ops,
    )
}

// ============================================================================
//  Insert properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every inserted key is findable, and the key count matches the
    /// distinct-key count regardless of insertion order or duplicates.
    #[test]
    fn insert_round_trip(order in order(), keys in keys(300)) {
        let mut tree = BTreeIndex::new(order).unwrap();
        let mut oracle = BTreeSet::new();

        for key in keys {
            tree.insert(key);
            oracle.insert(key);
        }
        tree.check_invariants();

        prop_assert_eq!(tree.count_keys(), oracle.len());
        for &key in &oracle {
            prop_assert!(tree.contains(key), "lost key {}", key);
        }
    }

    /// The in-order dump equals the sorted distinct input.
    #[test]
    fn in_order_dump_is_sorted_input(order in order(), keys in keys(300)) {
        let mut tree = BTreeIndex::new(order).unwrap();
        for &key in &keys {
            tree.insert(key);
        }
        let expected: Vec<i64> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(tree.keys_in_order(), expected);
    }

    /// Inserting a key twice yields the same key set as inserting it once.
    #[test]
    fn duplicate_insert_is_idempotent(order in order(), keys in unique_keys(200)) {
        let mut once = BTreeIndex::new(order).unwrap();
        let mut twice = BTreeIndex::new(order).unwrap();

        for &key in &keys {
            once.insert(key);
            twice.insert(key);
            twice.insert(key);
        }
        once.check_invariants();
        twice.check_invariants();
        prop_assert_eq!(once.keys_in_order(), twice.keys_in_order());
        prop_assert_eq!(once.count_nodes(), twice.count_nodes());
    }
}

// ============================================================================
//  Remove properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Removing a present key makes it absent and shrinks the count by
    /// exactly one; the balance invariants hold after every removal.
    #[test]
    fn remove_then_absent(order in order(), keys in unique_keys(200)) {
        let mut tree = BTreeIndex::new(order).unwrap();
        for &key in &keys {
            tree.insert(key);
        }

        let mut remaining = keys.len();
        // Remove in a different order than insertion (middle-out).
        let mut victims = keys.clone();
        victims.sort_by_key(|&k| (k.abs(), k));
        for key in victims {
            tree.remove(key);
            tree.check_invariants();
            remaining -= 1;
            prop_assert!(!tree.contains(key));
            prop_assert_eq!(tree.count_keys(), remaining);
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.count_nodes(), 0);
    }

    /// Removing an absent key changes nothing, shape included.
    #[test]
    fn absent_remove_is_noop(order in order(), keys in unique_keys(200), probe in KEY_RANGE) {
        let mut tree = BTreeIndex::new(order).unwrap();
        for &key in &keys {
            tree.insert(key);
        }
        prop_assume!(!keys.contains(&probe));

        let shape = tree.dump();
        tree.remove(probe);
        prop_assert_eq!(tree.dump(), shape);
        tree.check_invariants();
    }
}

// ============================================================================
//  Random operation sequences vs oracle
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Arbitrary interleavings of insert/remove/contains agree with a
    /// `BTreeSet` oracle at every step, with invariants intact throughout.
    #[test]
    fn random_ops_match_oracle(order in order(), ops in operations(400)) {
        let mut tree = BTreeIndex::new(order).unwrap();
        let mut oracle = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    tree.insert(key);
                    oracle.insert(key);
                }
                Op::Remove(key) => {
                    tree.remove(key);
                    oracle.remove(&key);
                }
                Op::Contains(key) => {
                    prop_assert_eq!(tree.contains(key), oracle.contains(&key));
                }
            }
            tree.check_invariants();
            prop_assert_eq!(tree.count_keys(), oracle.len());
        }

        let expected: Vec<i64> = oracle.into_iter().collect();
        prop_assert_eq!(tree.keys_in_order(), expected);
    }

    /// Node count stays within the bounds implied by occupancy: at least
    /// enough nodes to hold every key, at most one node per key plus one.
    #[test]
    fn node_count_bounded(order in order(), keys in unique_keys(300)) {
        let mut tree = BTreeIndex::new(order).unwrap();
        for &key in &keys {
            tree.insert(key);
        }
        if keys.is_empty() {
            prop_assert_eq!(tree.count_nodes(), 0);
        } else {
            let nodes = tree.count_nodes();
            prop_assert!(nodes <= keys.len() + 1);
            prop_assert!(keys.len() <= nodes * (order - 1));
        }
    }
}
