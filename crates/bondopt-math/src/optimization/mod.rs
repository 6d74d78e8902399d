//! Linear programming.
//!
//! A narrow modeling interface: add bounded variables, add linear
//! constraints, set the objective, solve. [`LpModel`] holds the problem
//! independently of any solver; [`LpSolver`] implementations translate and
//! solve it. [`MicroLpSolver`] is the bundled backend.

mod lp_format;
mod microlp;
mod model;

pub use microlp::MicroLpSolver;
pub use model::{
    Comparison, Constraint, LinearExpr, LpModel, LpSolution, LpSolver, LpStatus, Sense, Variable,
    VariableId,
};
