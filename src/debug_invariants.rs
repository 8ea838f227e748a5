//! Self-checks for reducer state.
//!
//! Validation walks the whole retained buffer, so it is only run at
//! coarse-grained points (after a merge), never per added item.

use crate::sieve_error::SieveError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), SieveError>;
}

/// Turn a failed condition into [`SieveError::InvariantViolation`].
#[inline]
pub(crate) fn ensure(cond: bool, msg: impl FnOnce() -> String) -> Result<(), SieveError> {
    if cond {
        Ok(())
    } else {
        Err(SieveError::InvariantViolation(msg()))
    }
}

/// Run a fallible check and panic with context when invariant checking is
/// compiled in (debug builds, `strict-invariants` or `check-invariants`).
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
