//! Portfolio optimization.
//!
//! Builds a linear program over the bonds of one effective date and solves
//! it for the weights that maximise a target metric under budget,
//! concentration and duration-matching constraints.

mod formulation;
mod params;
mod result;

pub use formulation::{
    optimize, PortfolioProblem, BUDGET_CONSTRAINT, DURATION_LOWER_CONSTRAINT,
    DURATION_UPPER_CONSTRAINT,
};
pub use params::OptimizationParams;
pub use result::{CandidateWeight, OptimizationResult, SolveStatus};
