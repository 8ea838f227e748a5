//! Fold-style reducers over sorted streams.
//!
//! A reducer is the accumulator/combiner pair of a parallel fold: partitions
//! are reduced independently with [`StreamReducer::add`] and the partial
//! results are combined with [`StreamReducer::merge`], typically up a
//! balanced tree ([`merge_tree`]). Any driver (a plain loop, chunked
//! partitions, a rayon fold) can run a reducer through this trait.

pub mod sieve;
pub mod sieve_iter;

pub use sieve::SieveReducer;
pub use sieve_iter::SieveIter;

use crate::measure::DistanceMeasure;
use crate::sieve_error::SieveError;

/// Accumulate / combine / finish operations of a mergeable fold.
pub trait StreamReducer: Sized {
    type Item;
    type Output;

    /// Accumulate one item.
    fn add(&mut self, item: Self::Item) -> Result<(), SieveError>;
    /// Combine with a reducer over the following (or interleaved) range.
    fn merge(self, other: Self) -> Result<Self, SieveError>;
    /// Produce the result without consuming the accumulator.
    fn finish(&self) -> Self::Output;
}

/// Creates fresh, empty reducers sharing one configuration.
pub trait ReducerSupplier<T> {
    type Reducer: StreamReducer<Item = T>;

    fn supply(&self) -> Self::Reducer;
}

impl<T, D> StreamReducer for SieveReducer<T, D>
where
    T: Clone,
    D: DistanceMeasure<T> + Clone,
{
    type Item = T;
    type Output = Vec<T>;

    fn add(&mut self, item: T) -> Result<(), SieveError> {
        SieveReducer::add(self, item)
    }

    fn merge(self, other: Self) -> Result<Self, SieveError> {
        SieveReducer::merge(self, other)
    }

    fn finish(&self) -> Vec<T> {
        SieveReducer::finish(self)
    }
}

/// Merge adjacent reducers pairwise, level by level, preserving order.
///
/// Returns `None` for an empty input.
pub fn merge_tree<R: StreamReducer>(mut parts: Vec<R>) -> Result<Option<R>, SieveError> {
    while parts.len() > 1 {
        let mut next = Vec::with_capacity(parts.len().div_ceil(2));
        let mut it = parts.into_iter();
        while let Some(left) = it.next() {
            match it.next() {
                Some(right) => next.push(left.merge(right)?),
                None => next.push(left),
            }
        }
        parts = next;
    }
    Ok(parts.pop())
}

#[cfg(test)]
mod tests;
