//! Linear program for target-maximising portfolio weights.
//!
//! For candidate bonds `b` (the universe restricted to one effective date):
//!
//! ```text
//! maximise    sum_b  w_b * metric_b
//! subject to  sum_b  w_b                <= 1
//!             sum_b  w_b * ind_{b,k}    <= sector_cap        for each category k
//!             sum_b  w_b * dur_b        <= D + delta
//!             sum_b  w_b * dur_b        >= D - delta
//!             0 <= w_b <= max_individual_weight
//! ```
//!
//! where `D` is the plain sum of candidate durations.

use bondopt_core::Universe;
use bondopt_math::optimization::{Comparison, LinearExpr, LpModel, Sense, VariableId};
use bondopt_math::{LpSolver, LpStatus, MathError, MicroLpSolver};

use super::params::OptimizationParams;
use super::result::{CandidateWeight, OptimizationResult, SolveStatus};
use crate::bucketing::{expand_indicators, IndicatorView};
use crate::error::PortfolioResult;
use crate::types::OptimizerConfig;

/// Name of the budget constraint.
pub const BUDGET_CONSTRAINT: &str = "Maximum total weight";
/// Name of the duration ceiling constraint.
pub const DURATION_UPPER_CONSTRAINT: &str = "Duration upper bound";
/// Name of the duration floor constraint.
pub const DURATION_LOWER_CONSTRAINT: &str = "Duration lower bound";

/// A built, not yet solved, portfolio model.
#[derive(Debug, Clone)]
pub struct PortfolioProblem<'a> {
    params: OptimizationParams,
    weight_tolerance: f64,
    candidates: IndicatorView<'a>,
    duration_target: f64,
    model: LpModel,
    variables: Vec<VariableId>,
}

impl<'a> PortfolioProblem<'a> {
    /// Builds the model for a universe.
    ///
    /// Indicators are expanded over the whole universe before the date
    /// restriction, so the category set does not depend on the date.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::Validation` for unusable parameters or a bad
    ///   weight tolerance.
    /// - `PortfolioError::IndicatorCollision` or
    ///   `PortfolioError::MissingClassification` for a universe that cannot
    ///   be expanded on the configured classification level.
    pub fn build(
        universe: &'a Universe,
        params: &OptimizationParams,
        config: &OptimizerConfig,
    ) -> PortfolioResult<Self> {
        params.validate()?;
        config.validate()?;

        let expanded = expand_indicators(universe, config.classification_field)?;
        let candidates = expanded.restrict(|b| b.effective_date == params.effective_date);
        let duration_target: f64 = candidates
            .bonds()
            .iter()
            .map(|b| b.effective_duration)
            .sum();

        let mut model = LpModel::new(format!(
            "bond_portfolio_{}_{}",
            params.target, params.effective_date
        ));

        let variables = candidates
            .bonds()
            .iter()
            .map(|b| {
                model.add_variable(
                    format!("Bond_ID_{}", b.alias),
                    0.0,
                    params.max_individual_weight,
                )
            })
            .collect::<Result<Vec<_>, MathError>>()?;

        let weighted = |coef: &dyn Fn(usize) -> f64| {
            LinearExpr::from_terms(variables.iter().enumerate().map(|(row, &v)| (v, coef(row))))
        };
        let bonds = candidates.bonds();

        model.set_objective(
            Sense::Maximize,
            weighted(&|row: usize| bonds[row].metric(params.target)),
        )?;

        model.add_constraint(
            Some(BUDGET_CONSTRAINT),
            weighted(&|_: usize| 1.0),
            Comparison::LessEq,
            1.0,
        )?;

        for (index, category) in candidates.categories().iter().enumerate() {
            let terms: Vec<(VariableId, f64)> = variables
                .iter()
                .enumerate()
                .filter(|&(row, _)| candidates.category_index(row) == index)
                .map(|(_, &v)| (v, 1.0))
                .collect();
            // All-zero columns bound nothing.
            if terms.is_empty() {
                continue;
            }
            model.add_constraint(
                Some(*category),
                LinearExpr::from_terms(terms),
                Comparison::LessEq,
                params.sector_cap,
            )?;
        }

        let duration = weighted(&|row: usize| bonds[row].effective_duration);
        model.add_constraint(
            Some(DURATION_UPPER_CONSTRAINT),
            duration.clone(),
            Comparison::LessEq,
            duration_target + params.duration_delta,
        )?;
        model.add_constraint(
            Some(DURATION_LOWER_CONSTRAINT),
            duration,
            Comparison::GreaterEq,
            duration_target - params.duration_delta,
        )?;

        tracing::debug!(
            target_metric = %params.target,
            effective_date = %params.effective_date,
            candidates = candidates.len(),
            categories = candidates.categories().len(),
            duration_target,
            "built portfolio model"
        );

        Ok(Self {
            params: params.clone(),
            weight_tolerance: config.weight_tolerance,
            candidates,
            duration_target,
            model,
            variables,
        })
    }

    /// The underlying linear program.
    #[must_use]
    pub fn lp_model(&self) -> &LpModel {
        &self.model
    }

    /// Parameters the model was built from.
    #[must_use]
    pub fn params(&self) -> &OptimizationParams {
        &self.params
    }

    /// Unweighted sum of candidate durations.
    #[must_use]
    pub fn duration_target(&self) -> f64 {
        self.duration_target
    }

    /// Candidate bonds with their categories.
    #[must_use]
    pub fn candidates(&self) -> &IndicatorView<'a> {
        &self.candidates
    }

    /// Returns true if no bond carries the requested effective date.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Solves with the default backend.
    ///
    /// # Errors
    ///
    /// See [`solve_with`](Self::solve_with).
    pub fn solve(&self) -> PortfolioResult<OptimizationResult> {
        self.solve_with(&MicroLpSolver)
    }

    /// Solves with the given backend.
    ///
    /// A model without candidates is trivially optimal and is not handed to
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Math` if the backend fails, reports an
    /// unbounded objective, or omits variable values.
    pub fn solve_with(&self, solver: &dyn LpSolver) -> PortfolioResult<OptimizationResult> {
        if self.is_empty() {
            tracing::warn!(
                effective_date = %self.params.effective_date,
                "no bonds carry the requested effective date"
            );
            return Ok(self.result(SolveStatus::Optimal, Some(0.0), &[]));
        }

        let solution = self.model.solve_with(solver)?;
        match solution.status {
            LpStatus::Optimal => {
                let weights = self
                    .variables
                    .iter()
                    .map(|&v| {
                        solution.value(v).ok_or_else(|| {
                            MathError::solver_failed(format!(
                                "no value for variable {}",
                                v.index()
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                tracing::debug!(
                    objective = ?solution.objective_value,
                    "portfolio model solved"
                );
                Ok(self.result(SolveStatus::Optimal, solution.objective_value, &weights))
            }
            LpStatus::Infeasible => {
                tracing::warn!(
                    sector_cap = self.params.sector_cap,
                    duration_delta = self.params.duration_delta,
                    duration_target = self.duration_target,
                    "portfolio model is infeasible"
                );
                Ok(self.result(SolveStatus::Infeasible, None, &[]))
            }
            LpStatus::Unbounded => Err(MathError::solver_failed(
                "portfolio model reported an unbounded objective",
            )
            .into()),
        }
    }

    fn result(
        &self,
        status: SolveStatus,
        objective_value: Option<f64>,
        weights: &[f64],
    ) -> OptimizationResult {
        let candidates = self
            .candidates
            .bonds()
            .iter()
            .enumerate()
            .map(|(row, bond)| CandidateWeight {
                alias: bond.alias.clone(),
                weight: weights.get(row).copied().unwrap_or(0.0),
                effective_duration: bond.effective_duration,
                target_value: bond.metric(self.params.target),
                category: self.candidates.category_of(row).to_string(),
            })
            .collect();

        OptimizationResult {
            status,
            target: self.params.target,
            effective_date: self.params.effective_date,
            duration_target: self.duration_target,
            duration_delta: self.params.duration_delta,
            objective_value,
            candidates,
            categories: self
                .candidates
                .categories()
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            weight_tolerance: self.weight_tolerance,
        }
    }
}

/// Builds and solves the portfolio model with the default backend.
///
/// # Errors
///
/// Validation and configuration errors from [`PortfolioProblem::build`],
/// backend errors from [`PortfolioProblem::solve_with`]. Infeasibility is
/// reported through [`SolveStatus::Infeasible`], not as an error.
pub fn optimize(
    universe: &Universe,
    params: &OptimizationParams,
    config: &OptimizerConfig,
) -> PortfolioResult<OptimizationResult> {
    PortfolioProblem::build(universe, params, config)?.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondopt_core::{Bond, Classification, Date, TargetMetric};
    use bondopt_math::LpSolution;
    use rust_decimal_macros::dec;

    fn date() -> Date {
        Date::from_ymd(2023, 3, 31).unwrap()
    }

    fn bond(alias: &str, class2: &str, duration: f64, oas: f64) -> Bond {
        Bond::builder()
            .alias(alias)
            .classification(Classification::new("Corp", class2, "Sub", "Senior"))
            .rating("A")
            .effective_date(date())
            .effective_duration(duration)
            .market_value(dec!(100))
            .oas(oas)
            .ytm(oas + 3.0)
            .build()
            .unwrap()
    }

    fn universe() -> Universe {
        Universe::new(vec![
            bond("B1", "Energy", 2.0, 1.0),
            bond("B2", "Utility", 4.0, 3.0),
            bond("B3", "Banking", 6.0, 2.0),
        ])
        .unwrap()
    }

    fn params(delta: f64) -> OptimizationParams {
        OptimizationParams::new(TargetMetric::Oas, date())
            .with_sector_cap(1.0)
            .with_max_individual_weight(0.5)
            .with_duration_delta(delta)
    }

    #[test]
    fn test_model_shape() {
        let universe = universe();
        let problem = PortfolioProblem::build(&universe, &params(1.0), &OptimizerConfig::default())
            .unwrap();
        let lp = problem.lp_model();

        assert_relative_eq!(problem.duration_target(), 12.0);
        assert_eq!(lp.variables().len(), 3);
        assert_eq!(lp.variables()[0].name, "Bond_ID_B1");
        assert_eq!(lp.variables()[0].upper, 0.5);

        let names: Vec<_> = lp.constraints().iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(
            names,
            vec![
                BUDGET_CONSTRAINT,
                "Energy",
                "Utility",
                "Banking",
                DURATION_UPPER_CONSTRAINT,
                DURATION_LOWER_CONSTRAINT,
            ]
        );
        assert_relative_eq!(lp.constraints()[4].rhs, 13.0);
        assert_relative_eq!(lp.constraints()[5].rhs, 11.0);
    }

    #[test]
    fn test_narrow_band_is_infeasible() {
        let result = optimize(&universe(), &params(1.0), &OptimizerConfig::default()).unwrap();
        assert!(result.is_infeasible());
        assert!(result.allocation().is_empty());
        assert_eq!(result.objective_value, None);
    }

    #[test]
    fn test_wide_band_prefers_highest_spread() {
        let result = optimize(&universe(), &params(8.0), &OptimizerConfig::default()).unwrap();
        assert!(result.is_optimal());
        assert_relative_eq!(result.weight("B2").unwrap(), 0.5, epsilon = 1e-7);
        assert_relative_eq!(result.weight("B3").unwrap(), 0.5, epsilon = 1e-7);
        assert_relative_eq!(result.weight("B1").unwrap(), 0.0, epsilon = 1e-7);
        assert_relative_eq!(result.objective_value.unwrap(), 2.5, epsilon = 1e-7);
    }

    #[test]
    fn test_validation_runs_before_build() {
        let err = PortfolioProblem::build(
            &universe(),
            &params(1.0).with_sector_cap(2.0),
            &OptimizerConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_negative_weight_tolerance_rejected() {
        let config = OptimizerConfig::new().with_weight_tolerance(-0.1);
        let err = optimize(&universe(), &params(8.0), &config).unwrap_err();
        assert!(err.is_validation());
    }

    struct NeverCalled;

    impl LpSolver for NeverCalled {
        fn name(&self) -> &'static str {
            "never"
        }

        fn solve(&self, _model: &LpModel) -> bondopt_math::MathResult<LpSolution> {
            panic!("backend must not be called");
        }
    }

    #[test]
    fn test_no_candidates_skips_backend() {
        let universe = universe();
        let params = OptimizationParams::new(TargetMetric::Oas, Date::from_ymd(2020, 1, 1).unwrap());
        let problem = PortfolioProblem::build(&universe, &params, &OptimizerConfig::default())
            .unwrap();
        assert!(problem.is_empty());

        let result = problem.solve_with(&NeverCalled).unwrap();
        assert!(result.is_optimal());
        assert!(result.allocation().is_empty());
        assert_eq!(result.categories.len(), 3);
    }

    struct Unbounded;

    impl LpSolver for Unbounded {
        fn name(&self) -> &'static str {
            "unbounded"
        }

        fn solve(&self, _model: &LpModel) -> bondopt_math::MathResult<LpSolution> {
            Ok(LpSolution::unbounded())
        }
    }

    #[test]
    fn test_unbounded_is_an_error() {
        let universe = universe();
        let problem = PortfolioProblem::build(&universe, &params(8.0), &OptimizerConfig::default())
            .unwrap();
        assert!(problem.solve_with(&Unbounded).is_err());
    }
}
