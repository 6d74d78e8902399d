//! # Bondopt Portfolio
//!
//! Screening, summary analytics and portfolio optimization over a bond
//! universe.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every operation borrows the universe and returns a
//!   fresh derived value; nothing is cached or mutated
//! - **Explicit outcomes**: an empty segment and an infeasible model are
//!   ordinary results, kept apart from request and configuration errors
//! - **Solver-agnostic**: the optimizer builds a `bondopt_math` model and
//!   accepts any [`LpSolver`](bondopt_math::LpSolver) backend
//!
//! ## Quick Start
//!
//! ```rust
//! use bondopt_core::{Bond, Classification, Date, TargetMetric, Universe};
//! use bondopt_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let date = Date::from_ymd(2023, 3, 31).unwrap();
//! let bonds = [("B1", "Energy", 2.0, 1.0), ("B2", "Utility", 4.0, 3.0), ("B3", "Banking", 6.0, 2.0)]
//!     .into_iter()
//!     .map(|(alias, sector, duration, oas)| {
//!         Bond::builder()
//!             .alias(alias)
//!             .classification(Classification::new("Corp", sector, "Sub", "Senior"))
//!             .rating("A")
//!             .effective_date(date)
//!             .effective_duration(duration)
//!             .market_value(dec!(100))
//!             .oas(oas)
//!             .ytm(4.0)
//!             .build()
//!             .unwrap()
//!     })
//!     .collect();
//! let universe = Universe::new(bonds).unwrap();
//!
//! let params = OptimizationParams::new(TargetMetric::Oas, date)
//!     .with_sector_cap(1.0)
//!     .with_max_individual_weight(0.5)
//!     .with_duration_delta(8.0);
//! let result = optimize(&universe, &params, &OptimizerConfig::default()).unwrap();
//!
//! assert!(result.is_optimal());
//! assert_eq!(result.allocation().len(), 2);
//! ```
//!
//! ## Module Overview
//!
//! - [`screening`] - Segment filter and category listing
//! - [`bucketing`] - Classification indicator expansion
//! - [`analytics`] - Market value and OAS/YTM summary statistics
//! - [`optimizer`] - Linear-program portfolio construction
//! - [`request`] - Validation of loosely typed requests
//! - [`types`] - Optimizer configuration and request defaults

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod error;
pub mod optimizer;
pub mod request;
pub mod screening;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

pub use types::{OptimizationDefaults, OptimizerConfig};

pub use screening::{filter, list_categories, CategoryListing, DurationBand, SegmentSelector, Subset};

pub use bucketing::{expand_indicators, IndicatorView};

pub use analytics::{summarize, summarize_bonds, summarize_segment, SegmentSummary};

pub use optimizer::{
    optimize, CandidateWeight, OptimizationParams, OptimizationResult, PortfolioProblem,
    SolveStatus,
};

pub use request::{OptimizationRequest, SummaryRequest};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bondopt_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analytics::{summarize, summarize_bonds, summarize_segment, SegmentSummary};
    pub use crate::bucketing::{expand_indicators, IndicatorView};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::optimizer::{
        optimize, OptimizationParams, OptimizationResult, PortfolioProblem, SolveStatus,
    };
    pub use crate::request::{OptimizationRequest, SummaryRequest};
    pub use crate::screening::{filter, DurationBand, SegmentSelector, Subset};
    pub use crate::types::{OptimizationDefaults, OptimizerConfig};
}
