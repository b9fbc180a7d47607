//! CLI error types.

use lucas_models::ModelError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `lucas` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Model construction, solve or query failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
