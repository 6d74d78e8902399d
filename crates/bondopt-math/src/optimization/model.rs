//! Backend-independent linear program representation.

use crate::error::{MathError, MathResult};

use super::microlp::MicroLpSolver;

/// Handle to a decision variable, valid only for the model that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    /// Position of the variable in [`LpModel::variables`].
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A bounded continuous decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Display name (used in LP-format dumps).
    pub name: String,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound (may be `f64::INFINITY`).
    pub upper: f64,
}

/// An affine expression `sum(coef * var) + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VariableId, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// Creates the zero expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an expression from `(variable, coefficient)` pairs.
    #[must_use]
    pub fn from_terms(terms: impl IntoIterator<Item = (VariableId, f64)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0.0,
        }
    }

    /// Adds `coef * var`.
    pub fn add_term(&mut self, var: VariableId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Adds `coef * var`, builder style.
    #[must_use]
    pub fn with_term(mut self, var: VariableId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    /// Sets the constant offset.
    #[must_use]
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// The `(variable, coefficient)` terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    /// The constant offset.
    #[must_use]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Evaluates the expression at a point indexed by variable.
    ///
    /// Variables outside `values` contribute zero.
    #[must_use]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coef)| coef * values.get(var.0).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `expr <= rhs`
    LessEq,
    /// `expr >= rhs`
    GreaterEq,
    /// `expr == rhs`
    Equal,
}

impl Comparison {
    /// Operator as written in LP files.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::Equal => "=",
        }
    }
}

/// A named linear constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Optional name (used in LP-format dumps).
    pub name: Option<String>,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation.
    pub comparison: Comparison,
    /// Right-hand side constant.
    pub rhs: f64,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    /// Maximise the objective.
    #[default]
    Maximize,
    /// Minimise the objective.
    Minimize,
}

/// Outcome class of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// An optimal vertex was found.
    Optimal,
    /// The constraints admit no feasible point.
    Infeasible,
    /// The objective is unbounded over the feasible region.
    Unbounded,
}

/// Solver output.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Outcome class.
    pub status: LpStatus,
    /// Variable values indexed by [`VariableId::index`]; empty unless optimal.
    pub values: Vec<f64>,
    /// Objective value at the optimum.
    pub objective_value: Option<f64>,
}

impl LpSolution {
    /// An optimal solution.
    #[must_use]
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: LpStatus::Optimal,
            values,
            objective_value: Some(objective_value),
        }
    }

    /// An infeasible outcome.
    #[must_use]
    pub fn infeasible() -> Self {
        Self {
            status: LpStatus::Infeasible,
            values: Vec::new(),
            objective_value: None,
        }
    }

    /// An unbounded outcome.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            status: LpStatus::Unbounded,
            values: Vec::new(),
            objective_value: None,
        }
    }

    /// Returns true for an optimal outcome.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == LpStatus::Optimal
    }

    /// Value of a variable, if the solve produced one.
    #[must_use]
    pub fn value(&self, var: VariableId) -> Option<f64> {
        self.values.get(var.0).copied()
    }
}

/// A solver backend.
///
/// Implementations translate an [`LpModel`] into their own representation,
/// solve it, and report infeasibility through [`LpStatus`] rather than as an
/// error.
pub trait LpSolver {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Solves the model.
    fn solve(&self, model: &LpModel) -> MathResult<LpSolution>;
}

/// A linear program under construction.
///
/// # Example
///
/// ```rust
/// use bondopt_math::optimization::{Comparison, LinearExpr, LpModel, Sense};
///
/// let mut lp = LpModel::new("example");
/// let x = lp.add_variable("x", 0.0, 3.0).unwrap();
/// let y = lp.add_variable("y", 0.0, 3.0).unwrap();
/// lp.set_objective(Sense::Maximize, LinearExpr::new().with_term(x, 2.0).with_term(y, 1.0))
///     .unwrap();
/// lp.add_constraint(
///     Some("budget"),
///     LinearExpr::new().with_term(x, 1.0).with_term(y, 1.0),
///     Comparison::LessEq,
///     4.0,
/// )
/// .unwrap();
///
/// let solution = lp.solve().unwrap();
/// assert!(solution.is_optimal());
/// assert!((solution.objective_value.unwrap() - 7.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LpModel {
    name: String,
    sense: Sense,
    objective: LinearExpr,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl LpModel {
    /// Creates an empty maximisation model.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a continuous variable bounded to `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` if a bound is NaN, the lower bound is
    /// infinite, or `lower > upper`.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
    ) -> MathResult<VariableId> {
        let name = name.into();
        if lower.is_nan() || upper.is_nan() || lower.is_infinite() {
            return Err(MathError::invalid_input(format!(
                "variable '{name}' has invalid bounds [{lower}, {upper}]"
            )));
        }
        if lower > upper {
            return Err(MathError::invalid_input(format!(
                "variable '{name}' has lower bound {lower} above upper bound {upper}"
            )));
        }

        let id = VariableId(self.variables.len());
        self.variables.push(Variable { name, lower, upper });
        Ok(id)
    }

    /// Adds a linear constraint `expr <cmp> rhs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression references a foreign variable or
    /// any coefficient or the right-hand side is not finite.
    pub fn add_constraint(
        &mut self,
        name: Option<&str>,
        expr: LinearExpr,
        comparison: Comparison,
        rhs: f64,
    ) -> MathResult<()> {
        self.check_expr(&expr)?;
        if !rhs.is_finite() {
            return Err(MathError::invalid_input(format!(
                "constraint {} has non-finite right-hand side {rhs}",
                name.unwrap_or("<unnamed>")
            )));
        }

        self.constraints.push(Constraint {
            name: name.map(str::to_string),
            expr,
            comparison,
            rhs,
        });
        Ok(())
    }

    /// Sets the objective and its direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression references a foreign variable or a
    /// coefficient is not finite.
    pub fn set_objective(&mut self, sense: Sense, objective: LinearExpr) -> MathResult<()> {
        self.check_expr(&objective)?;
        self.sense = sense;
        self.objective = objective;
        Ok(())
    }

    /// Solves with the default backend ([`MicroLpSolver`]).
    pub fn solve(&self) -> MathResult<LpSolution> {
        self.solve_with(&MicroLpSolver)
    }

    /// Solves with the given backend.
    pub fn solve_with<S: LpSolver + ?Sized>(&self, solver: &S) -> MathResult<LpSolution> {
        log::debug!(
            "solving '{}' with {}: {} variables, {} constraints",
            self.name,
            solver.name(),
            self.variables.len(),
            self.constraints.len()
        );
        let solution = solver.solve(self)?;
        log::debug!("'{}' finished with status {:?}", self.name, solution.status);
        Ok(solution)
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optimization direction.
    #[must_use]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Objective expression.
    #[must_use]
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Variables in creation order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Constraints in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn check_expr(&self, expr: &LinearExpr) -> MathResult<()> {
        for &(var, coef) in expr.terms() {
            if var.0 >= self.variables.len() {
                return Err(MathError::UnknownVariable {
                    index: var.0,
                    count: self.variables.len(),
                });
            }
            if !coef.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "coefficient {coef} on '{}' is not finite",
                    self.variables[var.0].name
                )));
            }
        }
        if !expr.constant().is_finite() {
            return Err(MathError::invalid_input("expression constant is not finite"));
        }
        Ok(())
    }
}
