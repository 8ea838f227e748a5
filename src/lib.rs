//! # series-sieve
//!
//! series-sieve down-samples large, distance-ordered series (typically
//! timestamped samples) into an evenly spaced subsequence of about a target
//! size, keeping the first and last samples exactly. It runs as a single-pass,
//! constant-memory reducer and partial reducers built over adjacent ranges can
//! be merged, so the same reduction works serially, over chunks, or as a
//! parallel fold.
//!
//! ## Features
//! - [`SieveReducer`](reducer::SieveReducer): streaming admission with an
//!   adaptive spacing step, followed by an even re-spacing pass on read
//! - [`StreamReducer`](reducer::StreamReducer): the add/merge/finish fold
//!   contract, usable by any fold driver
//! - [`SieveCollector`](algs::collector::SieveCollector): serial, chunked and
//!   (feature `rayon`) parallel fold drivers
//! - [`WindowQuery`](algs::window::WindowQuery): `[start, end]` range requests
//!   with a spacing derived from the requested point count
//!
//! ## Usage
//!
//! ```
//! use series_sieve::prelude::*;
//!
//! let mut sieve = SieveReducer::new(Identity, 3, 1)?;
//! for t in 0i64..10 {
//!     sieve.add(t)?;
//! }
//! assert_eq!(sieve.finish(), vec![0, 5, 9]);
//! # Ok::<(), SieveError>(())
//! ```
//!
//! ## Ordering contract
//!
//! Items must arrive in non-decreasing distance order. `add` validates this
//! and returns [`SieveError::OutOfOrderInput`](sieve_error::SieveError) instead
//! of silently accepting a violation.
//!
//! ## Cargo features
//! - `rayon`: `SieveCollector::par_collect` on the rayon thread pool
//! - `strict-invariants` / `check-invariants`: keep internal invariant checks
//!   in release builds

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod measure;
pub mod reducer;
pub mod sieve_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::collector::SieveCollector;
    pub use crate::algs::window::{WindowQuery, sieve_window};
    pub use crate::config::{SieveConfig, SpacingPolicy};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::measure::{DistanceMeasure, Identity, KeyFn};
    pub use crate::reducer::{ReducerSupplier, SieveIter, SieveReducer, StreamReducer, merge_tree};
    pub use crate::sieve_error::SieveError;
}
