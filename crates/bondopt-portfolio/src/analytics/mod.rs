//! Aggregate analytics over selected bonds.
//!
//! - Market value total
//! - OAS and YTM distribution statistics (min, max, mean, median)

mod summary;

pub use summary::*;
