//! Optimization outcome.

use std::collections::BTreeMap;

use bondopt_core::{Date, TargetMetric};
use serde::{Deserialize, Serialize};

/// How a solve ended.
///
/// An infeasible model is an outcome, not an error, and is never reported
/// as an all-zero optimal portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// An optimal allocation was found.
    Optimal,
    /// No allocation satisfies the constraints.
    Infeasible,
}

/// One candidate bond and its solved weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWeight {
    /// Security alias.
    pub alias: String,
    /// Solved weight; zero when the model was infeasible.
    pub weight: f64,
    /// Effective duration of the bond.
    pub effective_duration: f64,
    /// Value of the target metric for the bond.
    pub target_value: f64,
    /// Concentration category of the bond.
    pub category: String,
}

/// Full state of a solved portfolio model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Solve outcome.
    pub status: SolveStatus,
    /// Metric that was maximised.
    pub target: TargetMetric,
    /// Effective date the candidates were restricted to.
    pub effective_date: Date,
    /// Unweighted sum of candidate durations.
    pub duration_target: f64,
    /// Half-width of the duration band.
    pub duration_delta: f64,
    /// Objective value at the optimum.
    pub objective_value: Option<f64>,
    /// Every candidate, including zero weights, in universe order.
    pub candidates: Vec<CandidateWeight>,
    /// Concentration categories, one per indicator column.
    pub categories: Vec<String>,
    /// Weights at or below this are treated as zero.
    pub weight_tolerance: f64,
}

impl OptimizationResult {
    /// Returns true if an optimal allocation was found.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Returns true if the constraints could not be satisfied.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        self.status == SolveStatus::Infeasible
    }

    /// Bonds held with a weight above the tolerance.
    ///
    /// Empty unless the solve was optimal.
    #[must_use]
    pub fn allocation(&self) -> Vec<(&str, f64)> {
        if !self.is_optimal() {
            return Vec::new();
        }
        self.candidates
            .iter()
            .filter(|c| c.weight > self.weight_tolerance)
            .map(|c| (c.alias.as_str(), c.weight))
            .collect()
    }

    /// [`allocation`](Self::allocation) keyed by alias.
    #[must_use]
    pub fn allocation_map(&self) -> BTreeMap<String, f64> {
        self.allocation()
            .into_iter()
            .map(|(alias, weight)| (alias.to_string(), weight))
            .collect()
    }

    /// Solved weight of a candidate, if the bond was a candidate.
    #[must_use]
    pub fn weight(&self, alias: &str) -> Option<f64> {
        self.candidates
            .iter()
            .find(|c| c.alias == alias)
            .map(|c| c.weight)
    }

    /// Sum of held weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.allocation().iter().map(|(_, w)| w).sum()
    }

    /// Weighted portfolio duration, `sum(weight * duration)`.
    #[must_use]
    pub fn portfolio_duration(&self) -> f64 {
        self.held().map(|c| c.weight * c.effective_duration).sum()
    }

    /// Allowed range of the portfolio duration.
    #[must_use]
    pub fn duration_band(&self) -> (f64, f64) {
        (
            self.duration_target - self.duration_delta,
            self.duration_target + self.duration_delta,
        )
    }

    /// Aggregate held weight per category.
    #[must_use]
    pub fn category_exposures(&self) -> BTreeMap<String, f64> {
        let mut exposures: BTreeMap<String, f64> = BTreeMap::new();
        for c in self.held() {
            *exposures.entry(c.category.clone()).or_default() += c.weight;
        }
        exposures
    }

    fn held(&self) -> impl Iterator<Item = &CandidateWeight> {
        let tolerance = self.weight_tolerance;
        let optimal = self.is_optimal();
        self.candidates
            .iter()
            .filter(move |c| optimal && c.weight > tolerance)
    }
}
