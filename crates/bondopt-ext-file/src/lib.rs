//! # Bondopt Ext File
//!
//! File-based universe loading for bondopt.
//!
//! Reads the tabular bond dataset (one row per bond and effective date)
//! from CSV into an immutable [`Universe`](bondopt_core::Universe). Loading
//! happens once at process start; nothing here is consulted per request.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod universe_csv;

pub use error::{FileError, FileResult};
pub use universe_csv::{load_universe, read_universe};
