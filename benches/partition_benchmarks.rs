//! Cell registry and partition selector benchmarks
//!
//! Measures registration plus training-cell selection on large recording
//! pools, with and without subsampling.
//!
//! Run with: cargo bench --bench partition_benchmarks

use c2s_train::data::RecordingEntry;
use c2s_train::orchestrator::prepare_training_data;
use c2s_train::rng::ExperimentRng;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const TRACES_PER_CELL: i64 = 8;

fn entries(cells: i64) -> Vec<RecordingEntry> {
    (0..cells * TRACES_PER_CELL)
        .map(|i| RecordingEntry::new().with_cell_num(i / TRACES_PER_CELL))
        .collect()
}

/// Benchmark registry + selection + filtering
fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_training_data");

    for cells in [100_i64, 10_000] {
        let data = entries(cells);

        group.bench_with_input(BenchmarkId::new("all_cells", cells), &data, |b, data| {
            b.iter(|| {
                let mut rng = ExperimentRng::seeded(0);
                prepare_training_data(black_box(data.clone()), 0, &mut rng)
            });
        });

        group.bench_with_input(BenchmarkId::new("half_cells", cells), &data, |b, data| {
            b.iter(|| {
                let mut rng = ExperimentRng::seeded(0);
                prepare_training_data(black_box(data.clone()), cells / 2, &mut rng)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prepare);
criterion_main!(benches);
