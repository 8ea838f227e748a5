#![allow(dead_code)]
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use series_sieve::{measure::Identity, reducer::SieveReducer};

/// A timestamped price sample, the typical sieved item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub time: i64,
    pub price: f64,
}

pub fn tick_time(t: &Tick) -> i64 {
    t.time
}

/// `n` ticks with seeded random gaps in `1..=max_gap` starting at `start`.
pub fn random_ticks(n: usize, start: i64, max_gap: i64, seed: u64) -> Vec<Tick> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut time = start;
    (0..n)
        .map(|_| {
            let t = Tick {
                time,
                price: rng.gen_range(10.0..500.0),
            };
            time += rng.gen_range(1..=max_gap);
            t
        })
        .collect()
}

/// Reduce integers in one reducer.
pub fn sieve_ints(items: &[i64], size: usize, spacing: u64) -> Vec<i64> {
    let mut s = SieveReducer::new(Identity, size, spacing).unwrap();
    s.extend_sorted(items.iter().copied()).unwrap();
    s.finish()
}

/// Assert the endpoint and ordering guarantees of a sieved output.
pub fn assert_sieve_shape(out: &[i64], first: i64, last: i64) {
    assert_eq!(out.first(), Some(&first), "first of {:?}", out);
    assert_eq!(out.last(), Some(&last), "last of {:?}", out);
    assert!(
        out.windows(2).all(|w| w[0] < w[1]),
        "not strictly increasing: {:?}",
        out
    );
}
