
use crate::measure::Identity;
use crate::reducer::SieveReducer;

/// Reducer fed with `items` in order; panics on ordering errors.
pub(super) fn sieve_of(items: impl IntoIterator<Item = i64>, size: usize, spacing: u64) -> SieveReducer<i64, Identity> {
    let mut s = SieveReducer::new(Identity, size, spacing).expect("valid config");
    s.extend_sorted(items).expect("sorted input");
    s
}

pub(super) fn strictly_increasing(v: &[i64]) -> bool {
    v.windows(2).all(|w| w[0] < w[1])
}
