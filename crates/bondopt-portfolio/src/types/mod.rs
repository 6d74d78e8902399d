//! Configuration types for the portfolio crate.

mod config;

pub use config::{OptimizationDefaults, OptimizerConfig};
