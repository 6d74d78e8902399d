//! Error types for screening and optimization.
//!
//! An infeasible optimization is *not* an error; it comes back as
//! [`SolveStatus::Infeasible`](crate::optimizer::SolveStatus::Infeasible)
//! inside an `Ok` result. Errors here are request-validation failures,
//! configuration problems detected while building a model, and backend
//! failures.

use bondopt_core::{ClassLevel, CoreError};
use bondopt_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A request field failed validation before any computation ran.
    #[error("Invalid request field '{field}': {reason}")]
    Validation {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A derived indicator column would shadow a base column.
    #[error("Indicator column '{name}' collides with an existing column")]
    IndicatorCollision {
        /// The colliding category value.
        name: String,
    },

    /// A bond has no value for the classification level driving indicators.
    #[error("Bond '{alias}' has no {level} classification")]
    MissingClassification {
        /// The bond's alias.
        alias: String,
        /// The empty level.
        level: ClassLevel,
    },

    /// Core type error (unknown field names, bad dates).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Numerical backend error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the request rather than the data or
    /// the solver.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for errors caused by the universe or model configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::IndicatorCollision { .. }
                | Self::MissingClassification { .. }
                | Self::Core(CoreError::UnknownField { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::validation("sector_cap", "must be within [0, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid request field 'sector_cap': must be within [0, 1]"
        );
        assert!(err.is_validation());

        let err = PortfolioError::MissingClassification {
            alias: "B1".into(),
            level: ClassLevel::Two,
        };
        assert_eq!(err.to_string(), "Bond 'B1' has no CLASS_2 classification");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_math_error() {
        let err: PortfolioError = MathError::solver_failed("boom").into();
        assert!(!err.is_validation());
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "Solver failed: boom");
    }
}
