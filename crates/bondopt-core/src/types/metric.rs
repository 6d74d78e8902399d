//! Return and spread metrics that can be summarized or optimized.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Metric a portfolio is built to maximise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetMetric {
    /// Option-adjusted spread.
    #[default]
    #[serde(rename = "OAS", alias = "oas")]
    Oas,
    /// Yield to maturity.
    #[serde(rename = "YTM", alias = "ytm")]
    Ytm,
}

impl TargetMetric {
    /// All supported metrics.
    pub const ALL: [TargetMetric; 2] = [Self::Oas, Self::Ytm];

    /// Column name used by tabular sources.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Oas => "OAS",
            Self::Ytm => "YTM",
        }
    }
}

impl fmt::Display for TargetMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for TargetMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OAS" => Ok(Self::Oas),
            "YTM" => Ok(Self::Ytm),
            _ => Err(CoreError::unknown_field(s, &["OAS", "YTM"])),
        }
    }
}
