//! Bond record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClassLevel, Classification, Date, Rating, TargetMetric};
use crate::error::{CoreError, CoreResult};

/// A bond in the universe, identified by its security alias.
///
/// Records are immutable once built; every derived view (filtered subsets,
/// indicator expansions) borrows them rather than copying attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// Security alias, unique within a universe.
    pub alias: String,

    /// Hierarchical classification, levels 1-4.
    pub classification: Classification,

    /// Credit rating label.
    pub rating: Rating,

    /// Date this record applies to.
    pub effective_date: Date,

    /// Effective duration in years (non-negative).
    pub effective_duration: f64,

    /// Market value (non-negative).
    pub market_value: Decimal,

    /// Option-adjusted spread.
    pub oas: f64,

    /// Yield to maturity.
    pub ytm: f64,
}

impl Bond {
    /// Column names of the tabular form of a bond record.
    ///
    /// Derived columns (e.g. classification indicators) must not reuse these.
    pub const COLUMNS: [&'static str; 11] = [
        "SECURITY_ALIAS",
        "CLASS_1",
        "CLASS_2",
        "CLASS_3",
        "CLASS_4",
        "RATING",
        "EFFDATE",
        "EFFDUR",
        "MV",
        "OAS",
        "YTM",
    ];

    /// Creates a new bond builder.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::new()
    }

    /// Returns the classification tag at the given level.
    #[must_use]
    pub fn class(&self, level: ClassLevel) -> &str {
        self.classification.level(level)
    }

    /// Returns the value of a return/spread metric.
    #[must_use]
    pub fn metric(&self, metric: TargetMetric) -> f64 {
        match metric {
            TargetMetric::Oas => self.oas,
            TargetMetric::Ytm => self.ytm,
        }
    }
}

/// Builder for constructing a [`Bond`].
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    alias: Option<String>,
    classification: Classification,
    rating: Rating,
    effective_date: Option<Date>,
    effective_duration: Option<f64>,
    market_value: Decimal,
    oas: f64,
    ytm: f64,
}

impl BondBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the security alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the classification.
    #[must_use]
    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn rating(mut self, rating: impl Into<Rating>) -> Self {
        self.rating = rating.into();
        self
    }

    /// Sets the effective date.
    #[must_use]
    pub fn effective_date(mut self, date: Date) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// Sets the effective duration in years.
    #[must_use]
    pub fn effective_duration(mut self, duration: f64) -> Self {
        self.effective_duration = Some(duration);
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn market_value(mut self, market_value: Decimal) -> Self {
        self.market_value = market_value;
        self
    }

    /// Sets the option-adjusted spread.
    #[must_use]
    pub fn oas(mut self, oas: f64) -> Self {
        self.oas = oas;
        self
    }

    /// Sets the yield to maturity.
    #[must_use]
    pub fn ytm(mut self, ytm: f64) -> Self {
        self.ytm = ytm;
        self
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// Returns an error if alias, effective date or duration is missing, if
    /// duration or market value is negative, or if a metric is not finite.
    pub fn build(self) -> CoreResult<Bond> {
        let alias = self
            .alias
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| CoreError::missing_field("alias"))?;

        let effective_date = self
            .effective_date
            .ok_or_else(|| CoreError::missing_field("effective_date"))?;

        let effective_duration = self
            .effective_duration
            .ok_or_else(|| CoreError::missing_field("effective_duration"))?;

        if !effective_duration.is_finite() || effective_duration < 0.0 {
            return Err(CoreError::invalid_bond(
                &alias,
                format!("effective duration must be a non-negative number, got {effective_duration}"),
            ));
        }

        if self.market_value < Decimal::ZERO {
            return Err(CoreError::invalid_bond(
                &alias,
                "market value cannot be negative",
            ));
        }

        for (name, value) in [("OAS", self.oas), ("YTM", self.ytm)] {
            if !value.is_finite() {
                return Err(CoreError::invalid_bond(
                    &alias,
                    format!("{name} must be finite, got {value}"),
                ));
            }
        }

        Ok(Bond {
            alias,
            classification: self.classification,
            rating: self.rating,
            effective_date,
            effective_duration,
            market_value: self.market_value,
            oas: self.oas,
            ytm: self.ytm,
        })
    }
}
