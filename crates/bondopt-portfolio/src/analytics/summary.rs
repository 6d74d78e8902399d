//! Segment summary statistics.

use bondopt_core::{Bond, TargetMetric, Universe};
use bondopt_math::DescriptiveStats;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PortfolioResult;
use crate::screening::{filter, SegmentSelector, Subset};

/// Market value total and metric statistics of a set of bonds.
///
/// Every aggregate is `None` for an empty set, so "no data" never reads as a
/// zero market value or a zero spread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Number of bonds summarised.
    pub count: usize,

    /// Total market value.
    pub market_value: Option<Decimal>,

    /// Option-adjusted spread statistics.
    pub oas: Option<DescriptiveStats>,

    /// Yield-to-maturity statistics.
    pub ytm: Option<DescriptiveStats>,
}

impl SegmentSummary {
    /// Returns true if no bonds were summarised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Statistics for one metric.
    #[must_use]
    pub fn metric(&self, metric: TargetMetric) -> Option<&DescriptiveStats> {
        match metric {
            TargetMetric::Oas => self.oas.as_ref(),
            TargetMetric::Ytm => self.ytm.as_ref(),
        }
    }
}

/// Summarises a subset.
///
/// # Errors
///
/// Returns `PortfolioError::Math` if a metric sample contains NaN.
pub fn summarize(subset: &Subset<'_>) -> PortfolioResult<SegmentSummary> {
    summarize_bonds(subset.iter())
}

/// Summarises any collection of bonds.
///
/// # Errors
///
/// Returns `PortfolioError::Math` if a metric sample contains NaN.
pub fn summarize_bonds<'a>(
    bonds: impl IntoIterator<Item = &'a Bond>,
) -> PortfolioResult<SegmentSummary> {
    let bonds: Vec<&Bond> = bonds.into_iter().collect();
    if bonds.is_empty() {
        return Ok(SegmentSummary::default());
    }

    let market_value: Decimal = bonds.iter().map(|b| b.market_value).sum();
    let sample = |metric: TargetMetric| -> Vec<f64> {
        bonds.iter().map(|b| b.metric(metric)).collect()
    };

    Ok(SegmentSummary {
        count: bonds.len(),
        market_value: Some(market_value),
        oas: DescriptiveStats::try_from_sample(&sample(TargetMetric::Oas))?,
        ytm: DescriptiveStats::try_from_sample(&sample(TargetMetric::Ytm))?,
    })
}

/// Filters a universe by a selector and summarises the result.
///
/// # Errors
///
/// Returns `PortfolioError::Math` if a metric sample contains NaN.
pub fn summarize_segment(
    universe: &Universe,
    selector: &SegmentSelector,
) -> PortfolioResult<SegmentSummary> {
    let subset = filter(universe, selector);
    tracing::debug!(matched = subset.len(), "summarising segment");
    summarize(&subset)
}
