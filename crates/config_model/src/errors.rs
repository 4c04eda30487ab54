//! Configuration system error types.
//!
//! Domain-specific errors for loading, parsing, resolving and validating
//! configuration documents. All of these are fatal to the current run;
//! nothing in the configuration layer retries.

use thiserror::Error;

/// Configuration system errors.
///
/// Every variant identifies the offending file, URL or reference so the
/// operator can see which document in an `extends` chain failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {path} - {reason}")]
    FileAccess { path: String, reason: String },

    #[error("Failed to fetch configuration from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Remote configuration {url} returned status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Failed to parse configuration {source_name}: {reason}")]
    Parse { source_name: String, reason: String },

    #[error("Circular extends reference: {reference}")]
    CircularReference { reference: String },

    #[error("Invalid extends reference {reference}: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
