//! Error types for file loading.

use bondopt_core::CoreError;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while loading a universe file.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("Cannot read {path}: {message}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error text.
        message: String,
    },

    /// The CSV structure is malformed or a column is missing.
    #[error("CSV error{}: {message}", line_suffix(.line))]
    Csv {
        /// 1-based line number, when known.
        line: Option<u64>,
        /// Underlying error text.
        message: String,
    },

    /// A field could not be converted.
    #[error("Invalid {column} on line {line}: '{value}'")]
    InvalidValue {
        /// 1-based line number.
        line: u64,
        /// Column name.
        column: &'static str,
        /// Offending text.
        value: String,
    },

    /// A record parsed but describes an invalid bond.
    #[error("Line {line}: {source}")]
    Record {
        /// 1-based line number.
        line: u64,
        /// Validation failure.
        source: CoreError,
    },

    /// The loaded records do not form a valid universe.
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

impl From<csv::Error> for FileError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            line: err.position().map(csv::Position::line),
            message: err.to_string(),
        }
    }
}

impl FileError {
    /// Creates an I/O error for a path.
    #[must_use]
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }
}
