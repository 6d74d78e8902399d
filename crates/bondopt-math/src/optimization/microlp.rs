//! `good_lp` backend using the pure-Rust microlp simplex solver.

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable as GoodLpVariable,
};

use super::model::{Comparison, LinearExpr, LpModel, LpSolution, LpSolver, Sense};
use crate::error::{MathError, MathResult};

/// Dense simplex backend.
///
/// Deterministic for a given model: variables and constraints are handed to
/// the solver in model order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl LpSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &LpModel) -> MathResult<LpSolution> {
        let mut vars = ProblemVariables::new();

        let handles: Vec<GoodLpVariable> = model
            .variables()
            .iter()
            .map(|v| {
                let mut definition = variable().min(v.lower);
                if v.upper.is_finite() {
                    definition = definition.max(v.upper);
                }
                vars.add(definition)
            })
            .collect();

        let objective = to_expression(model.objective(), &handles);
        let unsolved = match model.sense() {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut problem = unsolved.using(microlp);

        for c in model.constraints() {
            let lhs = to_expression(&c.expr, &handles);
            let rhs = c.rhs;
            problem = problem.with(match c.comparison {
                Comparison::LessEq => constraint!(lhs <= rhs),
                Comparison::GreaterEq => constraint!(lhs >= rhs),
                Comparison::Equal => constraint!(lhs == rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|&h| solution.value(h)).collect();
                let objective_value = model.objective().evaluate(&values);
                Ok(LpSolution::optimal(values, objective_value))
            }
            Err(ResolutionError::Infeasible) => Ok(LpSolution::infeasible()),
            Err(ResolutionError::Unbounded) => Ok(LpSolution::unbounded()),
            Err(e) => Err(MathError::solver_failed(e.to_string())),
        }
    }
}

fn to_expression(expr: &LinearExpr, handles: &[GoodLpVariable]) -> Expression {
    expr.terms()
        .iter()
        .fold(Expression::from(expr.constant()), |acc, &(var, coef)| {
            acc + coef * handles[var.index()]
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::LpStatus;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounded_maximisation() {
        // max 3x + 2y  s.t. x + y <= 4, x + 3y <= 6, 0 <= x <= 3
        let mut lp = LpModel::new("textbook");
        let x = lp.add_variable("x", 0.0, 3.0).unwrap();
        let y = lp.add_variable("y", 0.0, f64::INFINITY).unwrap();
        lp.set_objective(
            Sense::Maximize,
            LinearExpr::from_terms([(x, 3.0), (y, 2.0)]),
        )
        .unwrap();
        lp.add_constraint(None, LinearExpr::from_terms([(x, 1.0), (y, 1.0)]), Comparison::LessEq, 4.0)
            .unwrap();
        lp.add_constraint(None, LinearExpr::from_terms([(x, 1.0), (y, 3.0)]), Comparison::LessEq, 6.0)
            .unwrap();

        let solution = MicroLpSolver.solve(&lp).unwrap();
        assert_eq!(solution.status, LpStatus::Optimal);
        assert_relative_eq!(solution.value(x).unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(solution.value(y).unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(solution.objective_value.unwrap(), 11.0, epsilon = 1e-9);
    }

    #[test]
    fn test_minimisation_with_equality() {
        // min x + y  s.t. x - y == 1, y >= 0.5
        let mut lp = LpModel::new("equality");
        let x = lp.add_variable("x", 0.0, 10.0).unwrap();
        let y = lp.add_variable("y", 0.0, 10.0).unwrap();
        lp.set_objective(Sense::Minimize, LinearExpr::from_terms([(x, 1.0), (y, 1.0)]))
            .unwrap();
        lp.add_constraint(None, LinearExpr::from_terms([(x, 1.0), (y, -1.0)]), Comparison::Equal, 1.0)
            .unwrap();
        lp.add_constraint(None, LinearExpr::from_terms([(y, 1.0)]), Comparison::GreaterEq, 0.5)
            .unwrap();

        let solution = lp.solve().unwrap();
        assert!(solution.is_optimal());
        assert_relative_eq!(solution.value(x).unwrap(), 1.5, epsilon = 1e-9);
        assert_relative_eq!(solution.value(y).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_infeasible_is_a_status() {
        let mut lp = LpModel::new("infeasible");
        let x = lp.add_variable("x", 0.0, 1.0).unwrap();
        lp.set_objective(Sense::Maximize, LinearExpr::from_terms([(x, 1.0)]))
            .unwrap();
        lp.add_constraint(None, LinearExpr::from_terms([(x, 1.0)]), Comparison::GreaterEq, 2.0)
            .unwrap();

        let solution = lp.solve().unwrap();
        assert_eq!(solution.status, LpStatus::Infeasible);
        assert!(solution.values.is_empty());
        assert!(solution.objective_value.is_none());
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            let mut lp = LpModel::new("tie");
            let x = lp.add_variable("x", 0.0, 1.0).unwrap();
            let y = lp.add_variable("y", 0.0, 1.0).unwrap();
            lp.set_objective(Sense::Maximize, LinearExpr::from_terms([(x, 1.0), (y, 1.0)]))
                .unwrap();
            lp.add_constraint(None, LinearExpr::from_terms([(x, 1.0), (y, 1.0)]), Comparison::LessEq, 1.0)
                .unwrap();
            lp
        };

        let first = build().solve().unwrap();
        let second = build().solve().unwrap();
        assert_eq!(first.values, second.values);
    }
}
