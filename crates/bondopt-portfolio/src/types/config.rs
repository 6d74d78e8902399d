//! Configuration for model construction and request defaults.

use bondopt_core::{ClassLevel, Date, TargetMetric};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Configuration for the portfolio optimizer.
///
/// Controls how the model is built and how solver output is read back, as
/// opposed to the per-request parameters in
/// [`OptimizationParams`](crate::optimizer::OptimizationParams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Weights at or below this value are treated as zero.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,

    /// Classification level whose distinct values become concentration
    /// categories.
    #[serde(default)]
    pub classification_field: ClassLevel,
}

fn default_weight_tolerance() -> f64 {
    1e-9
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            weight_tolerance: default_weight_tolerance(),
            classification_field: ClassLevel::Two,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-weight tolerance.
    #[must_use]
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// Sets the classification level used for concentration categories.
    #[must_use]
    pub fn with_classification_field(mut self, level: ClassLevel) -> Self {
        self.classification_field = level;
        self
    }

    /// Checks that the config can be used to read back solver output.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Validation` if `weight_tolerance` is negative
    /// or not finite.
    pub fn validate(&self) -> PortfolioResult<()> {
        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            return Err(PortfolioError::validation(
                "weight_tolerance",
                format!("must be a non-negative number, got {}", self.weight_tolerance),
            ));
        }
        Ok(())
    }
}

/// Values used for optimization request fields the caller leaves out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationDefaults {
    /// Metric to maximise.
    pub target: TargetMetric,
    /// Effective date the universe is restricted to.
    pub effective_date: Date,
    /// Maximum aggregate weight per category.
    pub sector_cap: f64,
    /// Maximum weight in a single bond.
    pub max_individual_weight: f64,
    /// Half-width of the duration band, in years.
    pub duration_delta: f64,
}

impl Default for OptimizationDefaults {
    fn default() -> Self {
        Self {
            target: TargetMetric::Oas,
            effective_date: Date::from_ymd(2023, 3, 31).unwrap_or_default(),
            sector_cap: 0.05,
            max_individual_weight: 0.02,
            duration_delta: 3.0,
        }
    }
}
