//! Error handling for sourcegen.
//! Defines the error type and result alias shared by every module.

use std::io;
use thiserror::Error;

/// Errors that can occur while configuring or running the generators.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the template engine
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors while writing JSON reports
    #[error("Serialization error: {0}.")]
    SerializationError(#[from] serde_json::Error),

    /// Represents errors that occur while loading the project descriptor
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents a descriptor that parsed but holds inconsistent values
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents a malformed locale identifier
    #[error("Invalid locale identifier '{0}'.")]
    LocaleError(String),

    /// Represents a driver call made out of lifecycle order
    #[error("Lifecycle error: {0}.")]
    LifecycleError(String),

    /// Wraps a failure raised while a blueprint emitted files for one variant
    #[error("Blueprint '{blueprint}' failed on variant '{variant}'")]
    EmissionError {
        blueprint: String,
        variant: String,
        #[source]
        source: Box<Error>,
    },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message, followed by the cause of an emission
/// failure, to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    match &err {
        Error::EmissionError { source, .. } => eprintln!("{err}: {source}"),
        _ => eprintln!("{err}"),
    }
    std::process::exit(1);
}
