//! Benchmarks for the iterative solvers.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{DMatrix, DVector};
use slaekit_solver::{Method, SolverConfig, determinant, solve};

/// Symmetric, strictly diagonally dominant test matrix (valid for every method).
fn test_system(size: usize) -> (DMatrix<f64>, DVector<f64>) {
    let a = DMatrix::from_fn(size, size, |i, j| {
        if i == j {
            (size as f64) + 1.0
        } else {
            1.0 / ((i as f64 - j as f64).abs() + 1.0)
        }
    });
    let b = DVector::from_fn(size, |i, _| (i + 1) as f64);
    (a, b)
}

fn bench_methods(c: &mut Criterion) {
    let config = SolverConfig::default();

    for method in Method::ALL {
        let mut group = c.benchmark_group(format!("solve_{}", method.name()));
        for size in [2, 4, 6, 8] {
            let (a, b) = test_system(size);
            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
                bencher.iter(|| solve(method, black_box(&a), black_box(&b), &config).unwrap());
            });
        }
        group.finish();
    }
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");

    for size in [4, 6, 8] {
        let (a, _) = test_system(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| determinant(black_box(&a)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_methods, bench_determinant);
criterion_main!(benches);
