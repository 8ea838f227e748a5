//! Fold drivers and range queries built on the sieve reducer.

pub mod collector;
pub mod window;

pub use collector::SieveCollector;
pub use window::{WindowQuery, sieve_window};
