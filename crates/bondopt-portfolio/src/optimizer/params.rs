//! Per-request optimization parameters.

use bondopt_core::{Date, TargetMetric};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::OptimizationDefaults;

/// Parameters of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationParams {
    /// Metric whose weighted sum is maximised.
    pub target: TargetMetric,
    /// Only bonds with exactly this effective date are candidates.
    pub effective_date: Date,
    /// Maximum aggregate weight in any one category.
    pub sector_cap: f64,
    /// Upper bound on each bond's weight.
    pub max_individual_weight: f64,
    /// Half-width of the band around the duration target, in years.
    pub duration_delta: f64,
}

impl OptimizationParams {
    /// Creates parameters for a target and date with the remaining values
    /// taken from [`OptimizationDefaults::default`].
    #[must_use]
    pub fn new(target: TargetMetric, effective_date: Date) -> Self {
        let defaults = OptimizationDefaults::default();
        Self {
            target,
            effective_date,
            sector_cap: defaults.sector_cap,
            max_individual_weight: defaults.max_individual_weight,
            duration_delta: defaults.duration_delta,
        }
    }

    /// Sets the per-category cap.
    #[must_use]
    pub fn with_sector_cap(mut self, cap: f64) -> Self {
        self.sector_cap = cap;
        self
    }

    /// Sets the per-bond weight bound.
    #[must_use]
    pub fn with_max_individual_weight(mut self, weight: f64) -> Self {
        self.max_individual_weight = weight;
        self
    }

    /// Sets the duration band half-width.
    #[must_use]
    pub fn with_duration_delta(mut self, delta: f64) -> Self {
        self.duration_delta = delta;
        self
    }

    /// Checks that every numeric parameter is usable before a model is built.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Validation` naming the first bad field:
    /// `sector_cap` outside `[0, 1]`, `max_individual_weight` outside
    /// `(0, 1]`, or a negative `duration_delta`. Non-finite values are
    /// rejected for all three.
    pub fn validate(&self) -> PortfolioResult<()> {
        if !self.sector_cap.is_finite() || !(0.0..=1.0).contains(&self.sector_cap) {
            return Err(PortfolioError::validation(
                "sector_cap",
                format!("must be within [0, 1], got {}", self.sector_cap),
            ));
        }
        if !self.max_individual_weight.is_finite()
            || self.max_individual_weight <= 0.0
            || self.max_individual_weight > 1.0
        {
            return Err(PortfolioError::validation(
                "max_individual_weight",
                format!("must be within (0, 1], got {}", self.max_individual_weight),
            ));
        }
        if !self.duration_delta.is_finite() || self.duration_delta < 0.0 {
            return Err(PortfolioError::validation(
                "duration_delta",
                format!("must be a non-negative number, got {}", self.duration_delta),
            ));
        }
        Ok(())
    }
}

impl From<&OptimizationDefaults> for OptimizationParams {
    fn from(defaults: &OptimizationDefaults) -> Self {
        Self {
            target: defaults.target,
            effective_date: defaults.effective_date,
            sector_cap: defaults.sector_cap,
            max_individual_weight: defaults.max_individual_weight,
            duration_delta: defaults.duration_delta,
        }
    }
}
