//! Adaptive sieve reducer.
//!
//! Items are admitted in two phases:
//!
//! 1. **Streaming admission** (`add`): an item is retained when its distance
//!    reaches the admission threshold (`previous retained + step`). Every time
//!    the retained count hits a multiple of `target_size`, the step is widened
//!    to `(threshold - range_start) / (target_size - 1)`, so retained counts
//!    stay near the target even for very long streams.
//! 2. **Even re-spacing** (`iter` / `finish`): the retained buffer is walked
//!    against a uniform grid of `target_size - 1` intervals spanning the first
//!    retained item to the last seen item.
//!
//! The first item added and the last item seen always bound the output.

use std::fmt;

use itertools::{EitherOrBoth, Itertools};
use static_assertions::assert_impl_all;

use crate::debug_invariants::{DebugInvariants, ensure};
use crate::measure::{DistanceMeasure, Identity};
use crate::reducer::sieve_iter::SieveIter;
use crate::sieve_error::SieveError;

/// Streaming, mergeable down-sampler over a distance-sorted stream.
#[derive(Clone)]
pub struct SieveReducer<T, D> {
    measure: D,
    target_size: usize,
    min_spacing: f64,
    /// Current admission spacing; starts at `min_spacing`, never shrinks.
    step: f64,
    /// Admission threshold as an offset from `range_start`.
    next_threshold: f64,
    range_start: i64,
    /// Distance of the last retained item.
    last_kept: i64,
    retained: Vec<T>,
    /// Most recent item when it was not admitted.
    tail: Option<T>,
    last_distance: i64,
}

/// `to - from` as `f64`, exact in the integer domain before rounding.
///
/// Positions are kept relative to the range start: absolute `i64` distances
/// above 2^53 do not survive `as f64`.
#[inline]
pub(crate) fn offset_between(from: i64, to: i64) -> f64 {
    (i128::from(to) - i128::from(from)) as f64
}

assert_impl_all!(SieveReducer<i64, Identity>: Send, Sync, Clone);
assert_impl_all!(SieveReducer<(i64, f64), fn(&(i64, f64)) -> i64>: Send, Sync, Clone);

impl<T, D> SieveReducer<T, D>
where
    D: DistanceMeasure<T>,
{
    /// Create an empty reducer.
    ///
    /// # Errors
    /// `InvalidArgument` if `target_size < 2` or `min_spacing < 1`.
    pub fn new(measure: D, target_size: usize, min_spacing: u64) -> Result<Self, SieveError> {
        if target_size < 2 {
            return Err(SieveError::invalid(format!(
                "sieve needs a target size of at least 2 items, got {target_size}"
            )));
        }
        if min_spacing < 1 {
            return Err(SieveError::invalid(
                "sieve needs a minimum spacing of at least 1",
            ));
        }
        Ok(Self::with_step(measure, target_size, min_spacing as f64, min_spacing as f64))
    }

    /// Unchecked constructor; callers guarantee `target_size >= 2` and `step >= 1`.
    pub(crate) fn with_step(measure: D, target_size: usize, min_spacing: f64, step: f64) -> Self {
        Self {
            measure,
            target_size,
            min_spacing,
            step,
            next_threshold: 0.0,
            range_start: 0,
            last_kept: 0,
            retained: Vec::new(),
            tail: None,
            last_distance: 0,
        }
    }

    /// Feed the next item of the sorted stream.
    ///
    /// Ordering is validated: an item whose distance is smaller than the
    /// previous item's is rejected with `OutOfOrderInput` and the reducer is
    /// left unchanged. Equal distances are accepted.
    pub fn add(&mut self, item: T) -> Result<(), SieveError> {
        let d = self.measure.distance(&item);
        if self.retained.is_empty() {
            self.range_start = d;
            self.last_kept = d;
            self.next_threshold = self.step;
            self.retained.push(item);
            self.tail = None;
            self.last_distance = d;
            return Ok(());
        }
        if d < self.last_distance {
            log::debug!(
                "rejecting out-of-order item: distance {} after {}",
                d,
                self.last_distance
            );
            return Err(SieveError::OutOfOrderInput {
                previous: self.last_distance,
                found: d,
            });
        }
        let offset = offset_between(self.range_start, d);
        if d > self.last_kept && offset >= self.next_threshold {
            self.retained.push(item);
            self.tail = None;
            self.last_kept = d;
            self.next_threshold = offset + self.step;
            if self.retained.len() % self.target_size == 0 {
                self.step = self.next_threshold / (self.target_size - 1) as f64;
                log::trace!(
                    "sieve step widened to {:.3} after {} retained items",
                    self.step,
                    self.retained.len()
                );
            }
        } else {
            self.tail = Some(item);
        }
        self.last_distance = d;
        Ok(())
    }

    /// Feed every item of `items`, stopping at the first ordering error.
    pub fn extend_sorted<I>(&mut self, items: I) -> Result<(), SieveError>
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    /// Restartable iterator over the down-sampled output.
    pub fn iter(&self) -> SieveIter<'_, T, D> {
        SieveIter::new(self)
    }

    /// Collect the down-sampled output.
    pub fn finish(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Distances of the down-sampled output.
    pub fn finish_distances(&self) -> Vec<i64> {
        self.iter().map(|item| self.measure.distance(item)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Current adaptive admission step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of items currently held by the admission phase.
    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    pub fn measure(&self) -> &D {
        &self.measure
    }

    /// First item ever added.
    pub fn first(&self) -> Option<&T> {
        self.retained.first()
    }

    /// Most recently added item.
    pub fn last(&self) -> Option<&T> {
        self.tail.as_ref().or_else(|| self.retained.last())
    }

    pub(crate) fn retained(&self) -> &[T] {
        &self.retained
    }

    pub(crate) fn tail(&self) -> Option<&T> {
        self.tail.as_ref()
    }

    pub(crate) fn last_distance(&self) -> i64 {
        self.last_distance
    }

    fn check_compatible(&self, other: &Self) -> Result<(), SieveError> {
        if self.target_size != other.target_size {
            return Err(SieveError::IncompatibleReducers {
                left: self.target_size,
                right: other.target_size,
            });
        }
        Ok(())
    }
}

impl<T, D> SieveReducer<T, D>
where
    T: Clone,
    D: DistanceMeasure<T> + Clone,
{
    /// Combine with a reducer built over an adjacent (or interleaved) range.
    ///
    /// Walks both *produced* sequences in distance order and feeds them into
    /// a fresh reducer that starts from `self`'s current step. On equal
    /// distances the item from `self` is fed first. Neither input changes.
    pub fn merged(&self, other: &Self) -> Result<Self, SieveError> {
        self.check_compatible(other)?;
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(other.clone());
        }

        let mut out = Self::with_step(
            self.measure.clone(),
            self.target_size,
            self.min_spacing,
            self.step,
        );
        let measure = &self.measure;
        let walk = self
            .iter()
            .merge_join_by(other.iter(), |a, b| measure.distance(a).cmp(&measure.distance(b)));
        for pair in walk {
            match pair {
                EitherOrBoth::Left(a) => out.add(a.clone())?,
                EitherOrBoth::Right(b) => out.add(b.clone())?,
                EitherOrBoth::Both(a, b) => {
                    out.add(a.clone())?;
                    out.add(b.clone())?;
                }
            }
        }
        log::trace!(
            "merged reducers ({} + {} retained) into {} retained",
            self.retained.len(),
            other.retained.len(),
            out.retained.len()
        );
        crate::debug_invariants!(out.validate_invariants(), "merged sieve reducer");
        Ok(out)
    }

    /// Consuming form of [`merged`](Self::merged); an empty side is dropped
    /// without re-sieving the other.
    pub fn merge(self, other: Self) -> Result<Self, SieveError> {
        self.check_compatible(&other)?;
        if other.is_empty() {
            return Ok(self);
        }
        if self.is_empty() {
            return Ok(other);
        }
        self.merged(&other)
    }
}

impl<T, D> DebugInvariants for SieveReducer<T, D>
where
    D: DistanceMeasure<T>,
{
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "SieveReducer");
    }

    fn validate_invariants(&self) -> Result<(), SieveError> {
        ensure(self.target_size >= 2, || {
            format!("target size {} below 2", self.target_size)
        })?;
        ensure(self.step >= self.min_spacing, || {
            format!("step {} below minimum spacing {}", self.step, self.min_spacing)
        })?;
        let Some(first) = self.retained.first() else {
            return ensure(self.tail.is_none(), || "tail present without retained items".into());
        };
        let start = self.measure.distance(first);
        ensure(start == self.range_start, || {
            format!("range start {} != first retained {}", self.range_start, start)
        })?;
        let mut prev = start;
        for item in &self.retained[1..] {
            let d = self.measure.distance(item);
            ensure(d > prev, || {
                format!("retained distances not strictly increasing: {prev} then {d}")
            })?;
            prev = d;
        }
        ensure(prev == self.last_kept, || {
            format!("last retained {} != cached {}", prev, self.last_kept)
        })?;
        if let Some(tail) = &self.tail {
            let d = self.measure.distance(tail);
            ensure(d >= prev, || format!("tail distance {d} precedes retained {prev}"))?;
            prev = d;
        }
        ensure(prev == self.last_distance, || {
            format!("last distance {} != cached {}", prev, self.last_distance)
        })
    }
}

impl<T: fmt::Debug, D> fmt::Debug for SieveReducer<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SieveReducer")
            .field("target_size", &self.target_size)
            .field("min_spacing", &self.min_spacing)
            .field("step", &self.step)
            .field("next_threshold", &self.next_threshold)
            .field("retained", &self.retained.len())
            .field("last", &self.tail.as_ref().or_else(|| self.retained.last()))
            .finish()
    }
}

impl<'a, T, D> IntoIterator for &'a SieveReducer<T, D>
where
    D: DistanceMeasure<T>,
{
    type Item = &'a T;
    type IntoIter = SieveIter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
