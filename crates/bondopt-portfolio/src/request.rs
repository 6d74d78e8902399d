//! Untyped request payloads and their validation.
//!
//! Requests arrive from a view layer with loosely typed fields. Validation
//! turns them into [`SegmentSelector`] and [`OptimizationParams`] values or
//! rejects them before any computation runs.

use bondopt_core::{ClassLevel, Classification, Date, TargetMetric};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::optimizer::OptimizationParams;
use crate::screening::{DurationBand, SegmentSelector};
use crate::types::OptimizationDefaults;

/// A segment summary request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Classification path, levels 1-4.
    pub classification: [String; 4],
    /// Rating label.
    pub rating: String,
    /// Exclusive lower duration bound.
    pub duration_min: f64,
    /// Exclusive upper duration bound.
    pub duration_max: f64,
}

impl SummaryRequest {
    /// Validates the request into a selector.
    ///
    /// `duration_min` becomes the band's lower bound and `duration_max` its
    /// upper bound.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Validation` for a blank classification level
    /// or rating, a non-finite bound, or `duration_min >= duration_max`.
    pub fn validate(&self) -> PortfolioResult<SegmentSelector> {
        for level in ClassLevel::ALL {
            if self.classification[level.index()].trim().is_empty() {
                return Err(PortfolioError::validation(
                    level.column_name(),
                    "must not be empty",
                ));
            }
        }
        if self.rating.trim().is_empty() {
            return Err(PortfolioError::validation("rating", "must not be empty"));
        }
        if !self.duration_min.is_finite() {
            return Err(PortfolioError::validation("duration_min", "must be a finite number"));
        }
        if !self.duration_max.is_finite() {
            return Err(PortfolioError::validation("duration_max", "must be a finite number"));
        }
        if self.duration_min >= self.duration_max {
            return Err(PortfolioError::validation(
                "duration_max",
                format!(
                    "must exceed duration_min ({} >= {})",
                    self.duration_min, self.duration_max
                ),
            ));
        }

        Ok(SegmentSelector::new(
            Classification::from_levels(self.classification.clone()),
            self.rating.as_str(),
            DurationBand::new(self.duration_min, self.duration_max)?,
        ))
    }
}

/// An optimization request; missing fields take configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationRequest {
    /// Target metric name, `OAS` or `YTM` (case-insensitive).
    pub target: Option<String>,
    /// Effective date in any format [`Date::parse_lenient`] accepts.
    pub effective_date: Option<String>,
    /// Maximum aggregate weight per category.
    pub sector_cap: Option<f64>,
    /// Maximum weight in a single bond.
    pub max_individual_weight: Option<f64>,
    /// Half-width of the duration band, in years.
    pub duration_delta: Option<f64>,
}

impl OptimizationRequest {
    /// Fills missing fields from `defaults` and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Validation` naming the offending field.
    pub fn resolve(&self, defaults: &OptimizationDefaults) -> PortfolioResult<OptimizationParams> {
        let target = match &self.target {
            Some(name) => name
                .parse::<TargetMetric>()
                .map_err(|e| PortfolioError::validation("target", e.to_string()))?,
            None => defaults.target,
        };
        let effective_date = match &self.effective_date {
            Some(text) => Date::parse_lenient(text)
                .map_err(|e| PortfolioError::validation("effective_date", e.to_string()))?,
            None => defaults.effective_date,
        };

        let params = OptimizationParams {
            target,
            effective_date,
            sector_cap: self.sector_cap.unwrap_or(defaults.sector_cap),
            max_individual_weight: self
                .max_individual_weight
                .unwrap_or(defaults.max_individual_weight),
            duration_delta: self.duration_delta.unwrap_or(defaults.duration_delta),
        };
        params.validate()?;
        Ok(params)
    }
}
