//! Classification bucketing.
//!
//! Derives per-category indicator columns used by concentration limits.

mod indicators;

pub use indicators::*;
