//! Micro-benchmarks for the B-tree index core operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use arbordb::BTreeIndex;

const N: i64 = 10_000;

/// Deterministic full-coverage shuffle of 0..n: stride by a prime coprime
/// to n so benches need no RNG dependency.
fn shuffled(n: i64) -> Vec<i64> {
    const STRIDE: i64 = 7919;
    (0..n).map(|i| (i * STRIDE) % n).collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = shuffled(N);

    c.bench_function("insert_10k_sequential", |b| {
        b.iter_batched(
            BTreeIndex::default,
            |mut tree| {
                for key in 0..N {
                    tree.insert(black_box(key));
                }
                tree
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("insert_10k_shuffled", |b| {
        b.iter_batched(
            BTreeIndex::default,
            |mut tree| {
                for &key in &keys {
                    tree.insert(black_box(key));
                }
                tree
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_find(c: &mut Criterion) {
    let mut tree = BTreeIndex::default();
    for key in shuffled(N) {
        tree.insert(key);
    }

    c.bench_function("find_hit", |b| {
        let mut key = 0;
        b.iter(|| {
            key = (key + 1) % N;
            black_box(tree.contains(black_box(key)))
        });
    });

    c.bench_function("find_miss", |b| {
        let mut key = 0;
        b.iter(|| {
            key = (key + 1) % N;
            black_box(tree.contains(black_box(key + N)))
        });
    });
}

fn bench_remove(c: &mut Criterion) {
    let keys = shuffled(N);

    c.bench_function("remove_10k_shuffled", |b| {
        b.iter_batched(
            || {
                let mut tree = BTreeIndex::default();
                for key in 0..N {
                    tree.insert(key);
                }
                tree
            },
            |mut tree| {
                for &key in &keys {
                    tree.remove(black_box(key));
                }
                tree
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_insert, bench_find, bench_remove);
criterion_main!(benches);
