//! SieveError: Unified error type for series-sieve public APIs
//!
//! Every fallible operation in the crate reports through this enum; the
//! library itself never panics on caller input.

use thiserror::Error;

/// Unified error type for sieve operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// Construction or query parameters out of range (target size, spacing, range).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An item's distance went backwards relative to the previously added item.
    #[error("Out-of-order input: distance {found} follows {previous}")]
    OutOfOrderInput { previous: i64, found: i64 },
    /// Two reducers with different configurations were merged.
    #[error("Incompatible reducers: target size {left} cannot merge with target size {right}")]
    IncompatibleReducers { left: usize, right: usize },
    /// Internal state check failed (only produced by invariant validation).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl SieveError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SieveError::InvalidArgument(msg.into())
    }
}
