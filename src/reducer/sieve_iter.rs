//! Output iterator for [`SieveReducer`].
//!
//! Walks the retained buffer against a uniform grid between the first
//! retained distance and the last seen distance. The grid position only
//! advances on emission, so a sparse stretch of retained items is followed by
//! denser emission until the grid catches up.

use std::iter::FusedIterator;
use std::slice;

use crate::measure::DistanceMeasure;
use crate::reducer::sieve::{SieveReducer, offset_between};

/// Candidate waiting to be yielded.
struct Pending<'a, T> {
    item: &'a T,
    is_first: bool,
    /// `item` is the final element of the retained buffer.
    is_final_retained: bool,
}

impl<T> Clone for Pending<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Pending<'_, T> {}

/// Restartable, non-mutating iterator over the down-sampled output.
pub struct SieveIter<'a, T, D> {
    measure: &'a D,
    rest: slice::Iter<'a, T>,
    start: i64,
    final_retained: Option<&'a T>,
    tail: Option<&'a T>,
    /// Next grid mark as an offset from `start`.
    position: f64,
    step: f64,
    pending: Option<Pending<'a, T>>,
}

impl<'a, T, D> SieveIter<'a, T, D>
where
    D: DistanceMeasure<T>,
{
    pub(crate) fn new(reducer: &'a SieveReducer<T, D>) -> Self {
        let measure = reducer.measure();
        let retained = reducer.retained();
        let Some((first, rest)) = retained.split_first() else {
            return Self {
                measure,
                rest: retained.iter(),
                start: 0,
                final_retained: None,
                tail: None,
                position: 0.0,
                step: 0.0,
                pending: None,
            };
        };
        let start = measure.distance(first);
        let span = offset_between(start, reducer.last_distance());
        let step = span / (reducer.target_size() - 1) as f64;
        Self {
            measure,
            rest: rest.iter(),
            start,
            final_retained: retained.last(),
            tail: reducer.tail(),
            position: step,
            step,
            pending: Some(Pending {
                item: first,
                is_first: true,
                is_final_retained: rest.is_empty(),
            }),
        }
    }

    /// Next retained item that reaches the current grid mark.
    fn advance(&mut self) -> Option<Pending<'a, T>> {
        while let Some(candidate) = self.rest.next() {
            if offset_between(self.start, self.measure.distance(candidate)) >= self.position {
                self.position += self.step;
                return Some(Pending {
                    item: candidate,
                    is_first: false,
                    is_final_retained: self.rest.len() == 0,
                });
            }
        }
        None
    }
}

impl<'a, T, D> Iterator for SieveIter<'a, T, D>
where
    D: DistanceMeasure<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let current = self.pending.take()?;
        if let Some(next) = self.advance() {
            self.pending = Some(next);
            return Some(current.item);
        }

        // `current` is the last grid emission; make sure the last seen item closes the output.
        match self.tail.take() {
            None => {
                if !current.is_final_retained {
                    self.pending = self.final_retained.map(|item| Pending {
                        item,
                        is_first: false,
                        is_final_retained: true,
                    });
                }
                Some(current.item)
            }
            Some(tail) => {
                let tail_d = self.measure.distance(tail);
                let current_d = self.measure.distance(current.item);
                if tail_d > current_d {
                    self.pending = Some(Pending {
                        item: tail,
                        is_first: false,
                        is_final_retained: true,
                    });
                    Some(current.item)
                } else if current.is_first {
                    // Same distance as the first item: the first item wins.
                    Some(current.item)
                } else {
                    Some(tail)
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let upper = pending + self.rest.len() + usize::from(self.tail.is_some()) + 1;
        (pending, Some(upper))
    }
}

impl<T, D> FusedIterator for SieveIter<'_, T, D> where D: DistanceMeasure<T> {}

impl<T, D> Clone for SieveIter<'_, T, D> {
    fn clone(&self) -> Self {
        Self {
            measure: self.measure,
            rest: self.rest.clone(),
            start: self.start,
            final_retained: self.final_retained,
            tail: self.tail,
            position: self.position,
            step: self.step,
            pending: self.pending,
        }
    }
}
