//! Reconciliation error types.
//!
//! The taxonomy follows the three failure classes of a run: configuration
//! errors (from `config_model`), gateway errors tagged with the category
//! whose fetch or mutation failed, and local value-resolution errors. Any of
//! these aborts the run; partial plans are never returned.

use thiserror::Error;

use crate::change::Category;

/// Errors that can occur during plan calculation or apply.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Configuration loading, resolution or validation failed.
    #[error(transparent)]
    Config(#[from] config_model::ConfigError),

    /// A comparator's gateway fetch failed.
    #[error("{category} comparison failed: {source}")]
    Compare {
        category: Category,
        source: github_gateway::Error,
    },

    /// An apply-time mutation failed.
    #[error("{category} apply failed: {source}")]
    Apply {
        category: Category,
        source: github_gateway::Error,
    },

    /// The local value store or secret provider failed.
    #[error("failed to resolve value for {name}: {reason}")]
    Value { name: String, reason: String },
}

/// Result type alias for reconciliation operations.
pub type AlignResult<T> = Result<T, AlignError>;
