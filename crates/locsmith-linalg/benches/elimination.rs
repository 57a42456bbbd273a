//! Benchmarks for prime-power elimination.
//!
//! Includes:
//! - Rank sequences of random sparse matrices
//! - Diagonal matrices with staged p-adic valuations
//! - Triplet assembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use locsmith_linalg::{GaussOptions, PowerGauss, SparseMatrix, TripletBuilder};
use locsmith_rings::PowerRing;

/// A random n x n matrix with roughly `fill` nonzeros per row.
fn random_sparse(n: usize, fill: usize, seed: u64) -> SparseMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = TripletBuilder::new(n, n);
    for _ in 0..n * fill {
        builder.push(
            rng.gen_range(0..n),
            rng.gen_range(0..n),
            rng.gen_range(1..64),
        );
    }
    builder.finalize().expect("indices are in range")
}

/// Benchmark the full lifting loop on random sparse matrices.
fn bench_rank_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_sequence");
    let ring = PowerRing::new(2, 6).expect("valid modulus");

    for size in [50, 200, 500] {
        let matrix = random_sparse(size, 4, 0xC0FFEE);
        group.bench_with_input(BenchmarkId::new("random", size), &matrix, |b, m| {
            b.iter(|| {
                let engine = PowerGauss::new(ring, GaussOptions::default());
                black_box(engine.rank_sequence(&mut m.clone()))
            })
        });
    }

    group.finish();
}

/// Benchmark the heuristic against the full pivot scan.
fn bench_pivot_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivot_strategies");
    let ring = PowerRing::new(3, 4).expect("valid modulus");
    let matrix = random_sparse(200, 4, 0xBEEF);

    for (name, prefer_same_column) in [("full_scan", false), ("same_column", true)] {
        let options = GaussOptions {
            prefer_same_column,
            preserve_upper: false,
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let engine = PowerGauss::new(ring, options);
                black_box(engine.rank_sequence(&mut matrix.clone()))
            })
        });
    }

    group.finish();
}

/// Benchmark matrices whose rank climbs one level per division.
fn bench_staged_valuations(c: &mut Criterion) {
    let mut group = c.benchmark_group("staged_valuations");
    let ring = PowerRing::new(2, 8).expect("valid modulus");

    for size in [64, 256] {
        let mut builder = TripletBuilder::new(size, size);
        for i in 0..size {
            builder.push(i, i, 1i64 << (i % 8));
        }
        let matrix = builder.finalize().expect("indices are in range");

        group.bench_with_input(BenchmarkId::new("diagonal", size), &matrix, |b, m| {
            b.iter(|| {
                let engine = PowerGauss::new(ring, GaussOptions::default());
                black_box(engine.rank_sequence(&mut m.clone()))
            })
        });
    }

    group.finish();
}

/// Benchmark triplet assembly, the usual input path.
fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for size in [1_000, 10_000] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let triplets: Vec<(usize, usize, i64)> = (0..size * 5)
            .map(|_| {
                (
                    rng.gen_range(0..size),
                    rng.gen_range(0..size),
                    rng.gen_range(-100..100),
                )
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("finalize", size), &triplets, |b, t| {
            b.iter(|| {
                let mut builder = TripletBuilder::new(size, size);
                for &(row, col, val) in t {
                    builder.push(row, col, val);
                }
                black_box(builder.finalize().expect("indices are in range"))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rank_sequence,
    bench_pivot_strategies,
    bench_staged_valuations,
    bench_assembly
);
criterion_main!(benches);
