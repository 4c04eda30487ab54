use thiserror::Error;

use config_model::ConfigError;
use repo_align_core::AlignError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the RepoAlign CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Loading, parsing or resolving the configuration failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan calculation or apply failed.
    #[error("{0}")]
    Align(#[from] AlignError),

    /// A direct gateway call failed.
    #[error("GitHub error: {0}")]
    Gateway(#[from] github_gateway::Error),

    /// No token was provided on the command line or in the environment.
    #[error("No GitHub token provided. Pass --token or set GITHUB_TOKEN.")]
    MissingToken,

    /// An env file was named but could not be read or parsed.
    #[error("Failed to load env file {path}: {reason}")]
    EnvFile { path: String, reason: String },

    /// Failed to flush the standard output buffer.
    #[error("Failed to flush the std out buffer.")]
    StdOutFlushFailed,

    /// Failed to read an answer from standard input.
    #[error("Failed to read from std in.")]
    StdInReadFailed,
}
