//! Criterion micro-benchmarks for cursor traversal and checked access.

use std::hint::black_box;

use contig_bench::{filled_array, strided_indices};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: sum 100K elements by cursor, by slice iterator, and by `at()`.
fn bench_traversal(c: &mut Criterion) {
    let a = filled_array(100_000);
    let mut group = c.benchmark_group("traverse_100k");

    group.bench_function("cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut cursor = a.begin();
            let end = a.end();
            while cursor != end {
                sum += *cursor.get(&a).unwrap();
                cursor.advance();
            }
            black_box(sum)
        });
    });

    group.bench_function("slice_iter", |b| {
        b.iter(|| black_box(a.iter().sum::<u64>()));
    });

    group.bench_function("checked_at", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..a.size() {
                sum += *a.at(i).unwrap();
            }
            black_box(sum)
        });
    });

    group.finish();
}

/// Benchmark: random-looking access through cursor indexing.
fn bench_strided_cursor_access(c: &mut Criterion) {
    let a = filled_array(1 << 16);
    let indices = strided_indices(a.size());
    let begin = a.begin();
    c.bench_function("cursor_strided_64k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &indices {
                sum += *begin.at(&a, i as isize).unwrap();
            }
            black_box(sum)
        });
    });
}

criterion_group!(benches, bench_traversal, bench_strided_cursor_access);
criterion_main!(benches);
