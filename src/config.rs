//! Sieve configuration and spacing policy.
//!
//! Both types are plain data with `serde` derives; where they are loaded from
//! is up to the embedding application.

use serde::{Deserialize, Serialize};

use crate::sieve_error::SieveError;

/// Seconds in one day; default upper bound for a derived minimum spacing.
pub const ONE_DAY_SECONDS: u64 = 86_400;

/// Target output size and minimum spacing of a sieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    pub target_size: usize,
    pub min_spacing: u64,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            target_size: 100,
            min_spacing: 1,
        }
    }
}

impl SieveConfig {
    pub fn new(target_size: usize, min_spacing: u64) -> Result<Self, SieveError> {
        let cfg = Self {
            target_size,
            min_spacing,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SieveError> {
        if self.target_size < 2 {
            return Err(SieveError::invalid(format!(
                "target size must be at least 2, got {}",
                self.target_size
            )));
        }
        if self.min_spacing < 1 {
            return Err(SieveError::invalid("minimum spacing must be at least 1"));
        }
        Ok(())
    }

    /// Configuration for `points` samples over `[start, end]`, with the
    /// minimum spacing derived by `policy`.
    pub fn for_range(
        start: i64,
        end: i64,
        points: usize,
        policy: &SpacingPolicy,
    ) -> Result<Self, SieveError> {
        let min_spacing = policy.min_spacing_for(start, end, points)?;
        Self::new(points, min_spacing)
    }
}

/// Derives a minimum spacing from a requested range.
///
/// Dividing a wide range evenly can sieve away nearly everything when the
/// actual data only covers a small part of it; `max_spacing` caps the derived
/// spacing so such ranges still yield a usable number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingPolicy {
    pub max_spacing: u64,
}

impl Default for SpacingPolicy {
    fn default() -> Self {
        Self {
            max_spacing: ONE_DAY_SECONDS,
        }
    }
}

impl SpacingPolicy {
    /// `floor((end - start) / (points - 1))`, clamped to `[1, max_spacing]`.
    pub fn min_spacing_for(&self, start: i64, end: i64, points: usize) -> Result<u64, SieveError> {
        if points < 2 {
            return Err(SieveError::invalid(format!(
                "a range query needs at least 2 points, got {points}"
            )));
        }
        if end < start {
            return Err(SieveError::invalid(format!(
                "range end {end} precedes start {start}"
            )));
        }
        let span = end.abs_diff(start);
        let even = span / (points as u64 - 1);
        Ok(even.clamp(1, self.max_spacing.max(1)))
    }
}
