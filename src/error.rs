//! Error handling for reposync.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for reposync operations.
///
/// Every error terminates the current subsystem's run. Nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// An expected path, sample file or fence marker is missing
    #[error("Not found: {0}.")]
    NotFound(String),

    /// Represents errors that occur during file system operations
    #[error("IO error at '{}': {source}.", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source tree, sample slice or mapping is malformed
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// A delegated collaborator command exited non-zero
    #[error("Command '{name}' failed with {status}.")]
    CommandFailed { name: String, status: String },

    /// Represents errors that occur during configuration parsing
    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

impl Error {
    /// Wraps an `io::Error` together with the path it was raised for.
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::IoError { path: path.into(), source }
    }
}

/// Convenience type alias for Results with `Error` as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
