//! Server startup errors.

use bondopt_ext_file::FileError;
use thiserror::Error;

/// Errors that stop the server from starting.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration in {path}: {message}")]
    Config {
        /// Configuration file path.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// The bond universe could not be loaded.
    #[error("Failed to load universe: {0}")]
    Universe(#[from] FileError),

    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
