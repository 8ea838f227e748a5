//! Fold drivers for [`SieveReducer`].
//!
//! [`SieveCollector`] holds a validated configuration and a distance measure,
//! supplies empty reducers, and runs the fold serially, over contiguous
//! chunks merged as a balanced tree, or (with the `rayon` feature) on the
//! rayon thread pool. Every driver preserves input order when combining.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::SieveConfig;
use crate::measure::DistanceMeasure;
use crate::reducer::{ReducerSupplier, SieveReducer, merge_tree};
use crate::sieve_error::SieveError;

/// Smallest number of items a rayon worker folds before splitting further.
pub const DEFAULT_MIN_PARTITION_LEN: usize = 4_096;

/// Supplier and driver of sieve folds sharing one configuration.
#[derive(Debug, Clone)]
pub struct SieveCollector<D> {
    measure: D,
    config: SieveConfig,
    min_partition_len: usize,
}

impl<D: Clone> SieveCollector<D> {
    pub fn new(measure: D, config: SieveConfig) -> Result<Self, SieveError> {
        config.validate()?;
        Ok(Self {
            measure,
            config,
            min_partition_len: DEFAULT_MIN_PARTITION_LEN,
        })
    }

    /// Shorthand for `new(measure, SieveConfig::new(target_size, min_spacing)?)`.
    pub fn of(measure: D, target_size: usize, min_spacing: u64) -> Result<Self, SieveError> {
        Self::new(measure, SieveConfig::new(target_size, min_spacing)?)
    }

    pub fn with_min_partition_len(mut self, len: usize) -> Self {
        self.min_partition_len = len.max(1);
        self
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// A fresh, empty reducer.
    pub fn supply<T>(&self) -> SieveReducer<T, D>
    where
        D: DistanceMeasure<T>,
    {
        let spacing = self.config.min_spacing as f64;
        SieveReducer::with_step(self.measure.clone(), self.config.target_size, spacing, spacing)
    }

    /// Fold a sorted stream into one reducer.
    pub fn collect<T, I>(&self, items: I) -> Result<SieveReducer<T, D>, SieveError>
    where
        I: IntoIterator<Item = T>,
        D: DistanceMeasure<T>,
    {
        let mut reducer = self.supply();
        reducer.extend_sorted(items)?;
        Ok(reducer)
    }

    /// Reduce `partitions` contiguous chunks independently, then merge them
    /// pairwise as a balanced tree.
    pub fn collect_chunked<T>(
        &self,
        items: &[T],
        partitions: usize,
    ) -> Result<SieveReducer<T, D>, SieveError>
    where
        T: Clone,
        D: DistanceMeasure<T>,
    {
        if items.is_empty() {
            return Ok(self.supply());
        }
        let chunk_len = items.len().div_ceil(partitions.max(1));
        let parts = items
            .chunks(chunk_len)
            .map(|chunk| self.collect(chunk.iter().cloned()))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "merging {} partial sieves of up to {} items",
            parts.len(),
            chunk_len
        );
        Ok(merge_tree(parts)?.unwrap_or_else(|| self.supply()))
    }

    /// Fold on the rayon pool: each worker reduces a contiguous split, and
    /// adjacent partial reducers are merged in input order.
    #[cfg(feature = "rayon")]
    pub fn par_collect<T, I>(&self, items: I) -> Result<SieveReducer<T, D>, SieveError>
    where
        I: IntoParallelIterator<Item = T>,
        I::Iter: IndexedParallelIterator,
        T: Clone + Send,
        D: DistanceMeasure<T> + Send + Sync,
    {
        items
            .into_par_iter()
            .with_min_len(self.min_partition_len)
            .try_fold(
                || self.supply(),
                |mut acc, item| {
                    acc.add(item)?;
                    Ok::<_, SieveError>(acc)
                },
            )
            .try_reduce(|| self.supply(), |left, right| left.merge(right))
    }
}

impl<T, D> ReducerSupplier<T> for SieveCollector<D>
where
    T: Clone,
    D: DistanceMeasure<T> + Clone,
{
    type Reducer = SieveReducer<T, D>;

    fn supply(&self) -> SieveReducer<T, D> {
        SieveCollector::supply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Identity;

    #[test]
    fn collector_rejects_bad_config() {
        assert!(SieveCollector::of(Identity, 1, 1).is_err());
        assert!(SieveCollector::of(Identity, 10, 0).is_err());
    }

    #[test]
    fn chunked_matches_serial_endpoints() {
        let items: Vec<i64> = (0..50_000).collect();
        let c = SieveCollector::of(Identity, 50, 1).unwrap();
        let serial = c.collect(items.iter().copied()).unwrap().finish();
        let chunked = c.collect_chunked(&items, 7).unwrap().finish();
        assert_eq!(serial.first(), chunked.first());
        assert_eq!(serial.last(), chunked.last());
        assert!(chunked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn chunked_empty_input_is_empty() {
        let c = SieveCollector::of(Identity, 10, 1).unwrap();
        let r = c.collect_chunked::<i64>(&[], 4).unwrap();
        assert!(r.finish().is_empty());
    }

    #[test]
    fn out_of_order_chunk_bubbles_error() {
        let c = SieveCollector::of(Identity, 10, 1).unwrap();
        let err = c.collect_chunked(&[1i64, 2, 0, 3], 1).unwrap_err();
        assert_eq!(err, SieveError::OutOfOrderInput { previous: 2, found: 0 });
    }
}
