//! Distance measures: mapping items onto a monotonic `i64` axis.
//!
//! A measure is used both to check input ordering and to compute spacing, so
//! the same measure must be used for every item of a reducer and for every
//! reducer merged with it. Because the measure is a type parameter, a missing
//! measure cannot be expressed.

use num_traits::PrimInt;

/// Maps an item to its position on the sieving axis (e.g. a timestamp).
pub trait DistanceMeasure<T: ?Sized> {
    fn distance(&self, item: &T) -> i64;
}

impl<T: ?Sized, F> DistanceMeasure<T> for F
where
    F: Fn(&T) -> i64,
{
    #[inline]
    fn distance(&self, item: &T) -> i64 {
        self(item)
    }
}

/// Uses a primitive integer item as its own distance.
///
/// Values outside the `i64` range saturate to `i64::MIN` / `i64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: PrimInt> DistanceMeasure<T> for Identity {
    #[inline]
    fn distance(&self, item: &T) -> i64 {
        saturating_i64(*item)
    }
}

/// Measures an item by an integer key of any primitive width, e.g. a `u64`
/// nanosecond timestamp or an `i32` sequence number.
///
/// Keys outside the `i64` range saturate the same way [`Identity`] does.
#[derive(Debug, Clone, Copy)]
pub struct KeyFn<F>(pub F);

impl<T: ?Sized, K, F> DistanceMeasure<T> for KeyFn<F>
where
    F: Fn(&T) -> K,
    K: PrimInt,
{
    #[inline]
    fn distance(&self, item: &T) -> i64 {
        saturating_i64((self.0)(item))
    }
}

fn saturating_i64<K: PrimInt>(key: K) -> i64 {
    key.to_i64().unwrap_or_else(|| {
        if key < K::zero() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}
