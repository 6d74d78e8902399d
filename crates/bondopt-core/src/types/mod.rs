//! Domain types for the Bondopt library.

mod bond;
mod classification;
mod date;
mod metric;
mod rating;

pub use bond::{Bond, BondBuilder};
pub use classification::{ClassLevel, Classification};
pub use date::Date;
pub use metric::TargetMetric;
pub use rating::Rating;
