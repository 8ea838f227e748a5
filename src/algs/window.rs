//! Range-window queries over sorted series.
//!
//! The typical chart request: "`points` samples of this series between
//! `start` and `end`". The minimum spacing comes from a [`SpacingPolicy`],
//! items outside the inclusive window are skipped, and the rest are sieved.

use crate::config::{SieveConfig, SpacingPolicy};
use crate::measure::DistanceMeasure;
use crate::reducer::SieveReducer;
use crate::sieve_error::SieveError;

/// A validated `[start, end]` window request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowQuery {
    pub start: i64,
    pub end: i64,
    pub config: SieveConfig,
}

impl WindowQuery {
    pub fn new(
        start: i64,
        end: i64,
        points: usize,
        policy: &SpacingPolicy,
    ) -> Result<Self, SieveError> {
        Ok(Self {
            start,
            end,
            config: SieveConfig::for_range(start, end, points, policy)?,
        })
    }

    #[inline]
    pub fn contains(&self, distance: i64) -> bool {
        (self.start..=self.end).contains(&distance)
    }

    /// Sieve the window out of a distance-sorted stream.
    ///
    /// Iteration stops at the first item past `end`; items after it are not
    /// checked for ordering.
    pub fn apply<T, D, I>(&self, items: I, measure: D) -> Result<SieveReducer<T, D>, SieveError>
    where
        I: IntoIterator<Item = T>,
        D: DistanceMeasure<T>,
    {
        let mut reducer =
            SieveReducer::new(measure, self.config.target_size, self.config.min_spacing)?;
        for item in items {
            let d = reducer.measure().distance(&item);
            if d > self.end {
                break;
            }
            if d >= self.start {
                reducer.add(item)?;
            }
        }
        Ok(reducer)
    }
}

/// Down-sample the items of a sorted series whose distance lies in
/// `[start, end]` to about `points` evenly spaced items.
pub fn sieve_window<T, D, I>(
    items: I,
    measure: D,
    start: i64,
    end: i64,
    points: usize,
    policy: &SpacingPolicy,
) -> Result<Vec<T>, SieveError>
where
    I: IntoIterator<Item = T>,
    D: DistanceMeasure<T>,
    T: Clone,
{
    let query = WindowQuery::new(start, end, points, policy)?;
    Ok(query.apply(items, measure)?.finish())
}
