use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use series_sieve::prelude::*;

/// Sorted timestamps with random gaps of 1..=60 seconds.
fn timestamps(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut t = 1_600_000_000i64;
    (0..n)
        .map(|_| {
            t += rng.gen_range(1..=60);
            t
        })
        .collect()
}

fn bench_serial(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve_serial");
    for &n in &[10_000usize, 100_000, 1_000_000] {
        let data = timestamps(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| {
                let mut s = SieveReducer::new(Identity, 500, 1).unwrap();
                s.extend_sorted(data.iter().copied()).unwrap();
                black_box(s.finish())
            })
        });
    }
    group.finish();
}

fn bench_chunked(c: &mut Criterion) {
    let data = timestamps(1_000_000, 7);
    let collector = SieveCollector::of(Identity, 500, 1).unwrap();
    let mut group = c.benchmark_group("sieve_chunked");
    for &parts in &[1usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &parts| {
            b.iter(|| black_box(collector.collect_chunked(&data, parts).unwrap().finish()))
        });
    }
    group.finish();
}

#[cfg(feature = "rayon")]
fn bench_rayon(c: &mut Criterion) {
    let data = timestamps(1_000_000, 7);
    let collector = SieveCollector::of(Identity, 500, 1).unwrap();
    c.bench_function("sieve_rayon_1m", |b| {
        b.iter(|| black_box(collector.par_collect(data.clone()).unwrap().finish()))
    });
}

#[cfg(not(feature = "rayon"))]
fn bench_rayon(_c: &mut Criterion) {}

criterion_group!(benches, bench_serial, bench_chunked, bench_rayon);
criterion_main!(benches);
