//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
///
/// An infeasible linear program is not an error: it is reported through
/// [`LpStatus::Infeasible`](crate::optimization::LpStatus::Infeasible).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// A term refers to a variable the model does not own.
    #[error("Unknown variable index {index} (model has {count} variables)")]
    UnknownVariable {
        /// The offending index.
        index: usize,
        /// Number of variables in the model.
        count: usize,
    },

    /// The solver backend failed for a reason other than infeasibility.
    #[error("Solver failed: {reason}")]
    SolverFailed {
        /// Backend-provided description.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a solver failed error.
    #[must_use]
    pub fn solver_failed(reason: impl Into<String>) -> Self {
        Self::SolverFailed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::insufficient_data(1, 0);
        assert!(err.to_string().contains("at least 1"));

        let err = MathError::UnknownVariable { index: 4, count: 2 };
        assert_eq!(err.to_string(), "Unknown variable index 4 (model has 2 variables)");
    }
}
