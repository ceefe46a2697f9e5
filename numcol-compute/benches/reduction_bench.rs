//! Full-column and row-subset reductions over chunked columns.
//!
//! Run:
//!   cargo bench --bench reduction_bench

#![forbid(unsafe_code)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use numcol_column_map::ColumnStoreConfig;
use numcol_compute::PrimitiveColumn;
use numcol_types::{CumulativeOp, ReduceOp};

const NUM_ROWS: usize = 1_000_000;
const FRAGMENTED_CHUNK: usize = 1_000;
const NUM_PROBES: usize = 100_000;

fn build(chunk_capacity: Option<usize>, null_every: Option<usize>) -> PrimitiveColumn<i64> {
    let config = ColumnStoreConfig {
        max_chunk_capacity: chunk_capacity,
    };
    let values = (0..NUM_ROWS).map(|i| match null_every {
        Some(n) if i % n == 0 => None,
        _ => Some(i as i64),
    });
    PrimitiveColumn::from_options(values, config).unwrap()
}

fn bench_full_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_1M");
    group.sample_size(20);

    let single = build(None, None);
    let fragmented = build(Some(FRAGMENTED_CHUNK), None);
    let sparse = build(Some(FRAGMENTED_CHUNK), Some(7));

    group.bench_function("sum_i64_single_chunk", |b| {
        b.iter(|| black_box(single.sum().unwrap()));
    });
    group.bench_function("sum_i64_1k_chunks", |b| {
        b.iter(|| black_box(fragmented.sum().unwrap()));
    });
    group.bench_function("sum_i64_1k_chunks_with_nulls", |b| {
        b.iter(|| black_box(sparse.sum().unwrap()));
    });
    group.bench_function("max_i64_1k_chunks", |b| {
        b.iter(|| black_box(fragmented.max().unwrap()));
    });

    group.finish();
}

fn bench_row_subset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_rows_100k");
    group.sample_size(20);

    let column = build(Some(FRAGMENTED_CHUNK), None);
    let mut rng = SmallRng::seed_from_u64(7);
    let random_rows: Vec<i64> = (0..NUM_PROBES)
        .map(|_| rng.random_range(0..NUM_ROWS as i64))
        .collect();
    let mut sorted_rows = random_rows.clone();
    sorted_rows.sort_unstable();

    group.bench_function("sum_sorted_rows", |b| {
        b.iter(|| {
            black_box(
                column
                    .reduce_rows(sorted_rows.iter().copied(), ReduceOp::Sum)
                    .unwrap(),
            )
        });
    });
    group.bench_function("sum_random_rows", |b| {
        b.iter(|| {
            black_box(
                column
                    .reduce_rows(random_rows.iter().copied(), ReduceOp::Sum)
                    .unwrap(),
            )
        });
    });

    group.finish();
}

fn bench_cumulative(c: &mut Criterion) {
    let mut group = c.benchmark_group("cumulative_1M");
    group.sample_size(10);

    let column = build(Some(FRAGMENTED_CHUNK), None);

    // Each iteration starts from a clone that shares every chunk, so the
    // measured scan includes the copy-on-write materialization.
    group.bench_function("cumulative_sum_shared_chunks", |b| {
        b.iter_batched(
            || column.clone(),
            |mut col| {
                col.cumulative(CumulativeOp::Sum).unwrap();
                black_box(col);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_full_column, bench_row_subset, bench_cumulative);
criterion_main!(benches);
