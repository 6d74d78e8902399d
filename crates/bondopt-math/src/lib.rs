//! # Bondopt Math
//!
//! Mathematical utilities for the Bondopt portfolio construction library.
//!
//! ## Modules
//!
//! - [`optimization`]: backend-independent linear programs ([`LpModel`]) and
//!   the bundled microlp simplex backend
//! - [`statistics`]: min / max / mean / median of metric samples
//!
//! ## Example
//!
//! ```rust
//! use bondopt_math::optimization::{Comparison, LinearExpr, LpModel, LpStatus, Sense};
//!
//! let mut lp = LpModel::new("two-bonds");
//! let a = lp.add_variable("a", 0.0, 0.6).unwrap();
//! let b = lp.add_variable("b", 0.0, 0.6).unwrap();
//! lp.set_objective(Sense::Maximize, LinearExpr::from_terms([(a, 1.0), (b, 3.0)])).unwrap();
//! lp.add_constraint(
//!     Some("budget"),
//!     LinearExpr::from_terms([(a, 1.0), (b, 1.0)]),
//!     Comparison::LessEq,
//!     1.0,
//! )
//! .unwrap();
//!
//! let solution = lp.solve().unwrap();
//! assert_eq!(solution.status, LpStatus::Optimal);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod optimization;
pub mod statistics;

pub use error::{MathError, MathResult};
pub use optimization::{LpModel, LpSolution, LpSolver, LpStatus, MicroLpSolver};
pub use statistics::DescriptiveStats;
