//! # Tensor Benchmarks
//!
//! Dense vs sparse matmul across sizes and densities, plus elementwise
//! throughput and initializer cost.
//!
//! Run: `cargo bench --bench tensor_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sil_tensor::prelude::*;

fn sparse_tensor(init: &mut Initializer, n: usize, sparsity: f64) -> Tensor {
    Tensor::new(init.sparse(n, n, sparsity)).expect("non-empty square tensor")
}

/// Benchmark dense and sparse matmul on square matrices
fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    let mut init = Initializer::from_seed(42);

    for size in [16usize, 64, 128].iter() {
        for sparsity in [0.0, 0.9] {
            let a = sparse_tensor(&mut init, *size, sparsity);
            let b = sparse_tensor(&mut init, *size, sparsity);
            let label = format!("{}x{}/sparsity={}", size, size, sparsity);

            group.bench_with_input(BenchmarkId::new("dense", &label), &(&a, &b), |bch, (a, b)| {
                bch.iter(|| black_box(a.matmul(b).expect("compatible shapes")))
            });

            group.bench_with_input(BenchmarkId::new("sparse", &label), &(&a, &b), |bch, (a, b)| {
                bch.iter(|| black_box(a.sparse_matmul(b).expect("compatible shapes")))
            });

            let config = MatmulConfig::default();
            group.bench_with_input(BenchmarkId::new("auto", &label), &(&a, &b), |bch, (a, b)| {
                bch.iter(|| black_box(a.matmul_with(b, &config).expect("compatible shapes")))
            });
        }
    }

    group.finish();
}

/// Benchmark elementwise arithmetic and mapping
fn bench_elementwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("elementwise");
    let mut init = Initializer::from_seed(7);

    for size in [64usize, 256].iter() {
        let a = Tensor::new(init.uniform(*size, *size, 1.0)).expect("non-empty");
        let b = Tensor::new(init.uniform(*size, *size, 1.0)).expect("non-empty");
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("add", size), &(&a, &b), |bch, (a, b)| {
            bch.iter(|| black_box(a.add(b).expect("same shape")))
        });

        group.bench_with_input(BenchmarkId::new("sigmoid", size), &a, |bch, a| {
            bch.iter(|| black_box(sigmoid(a)))
        });

        group.bench_with_input(BenchmarkId::new("bce", size), &(&a, &b), |bch, (a, b)| {
            bch.iter(|| black_box(bce(a, b).expect("same shape")))
        });

        group.bench_with_input(BenchmarkId::new("transpose", size), &a, |bch, a| {
            bch.iter(|| black_box(a.transpose()))
        });
    }

    group.finish();
}

/// Benchmark initializer schemes
fn bench_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("init");
    let mut init = Initializer::from_seed(1);

    for scheme in [InitScheme::Glorot, InitScheme::Sparse, InitScheme::Identity] {
        group.bench_function(scheme.name(), |b| {
            b.iter(|| black_box(init.generate(scheme, 128, 128)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_matmul,
    bench_elementwise,
    bench_init,
);

criterion_main!(benches);
