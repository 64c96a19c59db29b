//! Criterion benchmarks: naive reference vs the transposed row-parallel multiply.
//!
//! ```bash
//! cargo bench --bench matmul_bench
//! cargo bench --bench matmul_bench -- transpose
//! ```

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use matmul_bt::config::available_workers;
use matmul_bt::matrix::transpose::{transpose, transpose_parallel};
use matmul_bt::{Matrix, MultiplyConfig, matmul_naive, multiply_transposed_into};
use rand::prelude::*;

fn random_matrix(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0)).unwrap()
}

fn bench_multiply(c: &mut Criterion) {
    let workers = available_workers();

    for size in [64, 128, 256, 512] {
        let mut group = c.benchmark_group(format!("multiply_{}", size));
        group.sample_size(20);

        let mut rng = StdRng::seed_from_u64(42);
        let a = random_matrix(size, size, &mut rng);
        let b = random_matrix(size, size, &mut rng);
        let bt = b.transpose().unwrap();
        let mut out = vec![0.0; size * size];

        if size <= 256 {
            group.bench_function("naive_ijk", |bench| {
                bench.iter(|| {
                    matmul_naive(
                        black_box(a.as_slice()),
                        black_box(b.as_slice()),
                        black_box(&mut out),
                        size,
                        size,
                        size,
                    );
                });
            });
        }

        for w in [1, workers] {
            group.bench_with_input(BenchmarkId::new("transposed", w), &w, |bench, &w| {
                bench.iter(|| {
                    multiply_transposed_into(
                        black_box(a.as_slice()),
                        black_box(bt.as_slice()),
                        black_box(&mut out),
                        size,
                        size,
                        size,
                        w,
                    )
                    .unwrap();
                });
            });
        }

        group.bench_function("transpose_then_multiply", |bench| {
            let config = MultiplyConfig::new().with_workers(workers);
            bench.iter(|| black_box(matmul_bt::multiply(&a, &b, &config).unwrap()));
        });

        group.finish();
    }
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    let workers = available_workers();

    for size in [256, 1024] {
        let src: Vec<f64> = (0..size * size).map(|i| i as f64).collect();
        let mut dst = vec![0.0; size * size];

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bench, &n| {
            bench.iter(|| transpose(black_box(&src), black_box(&mut dst), n, n));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, &n| {
            bench.iter(|| {
                transpose_parallel(black_box(&src), black_box(&mut dst), n, n, workers).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_multiply, bench_transpose);
criterion_main!(benches);
