//! Universe screening.
//!
//! Selects segments of a universe by classification path, rating and
//! duration band, and lists the values available for selection.

mod filter;

pub use filter::*;
