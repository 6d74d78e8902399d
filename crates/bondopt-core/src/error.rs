//! Error types for the Bondopt core crate.
//!
//! Covers malformed bond records, duplicate identities in a universe and
//! unknown field names arriving from configuration or requests.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date parsing or an out-of-range date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A bond record failed validation.
    #[error("Invalid bond '{alias}': {reason}")]
    InvalidBond {
        /// Security alias of the offending record.
        alias: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// The same security alias appears more than once.
    #[error("Duplicate security alias: {alias}")]
    DuplicateAlias {
        /// The repeated alias.
        alias: String,
    },

    /// A field name that does not name a classification level or metric.
    #[error("Unknown field '{name}', expected one of: {expected}")]
    UnknownField {
        /// The unrecognised name.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid bond error.
    #[must_use]
    pub fn invalid_bond(alias: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            alias: alias.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a duplicate alias error.
    #[must_use]
    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Self::DuplicateAlias {
            alias: alias.into(),
        }
    }

    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(name: impl Into<String>, expected: &[&str]) -> Self {
        Self::UnknownField {
            name: name.into(),
            expected: expected.join(", "),
        }
    }
}
