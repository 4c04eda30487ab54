//! Local value resolution.
//!
//! Secrets and variable overrides come from outside the configuration file:
//! a `.env`-style store, an external secret provider, or both chained. The
//! comparators only see the [`ValueSource`] trait.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Failure while resolving a local value.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValueSourceError(pub String);

/// Resolves secret and variable values by name.
#[async_trait]
pub trait ValueSource: Send + Sync {
    /// Returns the value for `name`, or `None` when this source has no
    /// value for it.
    async fn resolve(&self, name: &str) -> Result<Option<String>, ValueSourceError>;
}

/// An in-memory value source.
///
/// Used by tests and by the CLI after parsing a `.env` file.
#[derive(Debug, Default, Clone)]
pub struct StaticValues {
    values: HashMap<String, String>,
}

impl StaticValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl From<HashMap<String, String>> for StaticValues {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

#[async_trait]
impl ValueSource for StaticValues {
    async fn resolve(&self, name: &str) -> Result<Option<String>, ValueSourceError> {
        Ok(self.values.get(name).cloned())
    }
}

/// Tries each source in order and returns the first value found.
pub struct ChainedValues {
    sources: Vec<Box<dyn ValueSource>>,
}

impl ChainedValues {
    pub fn new(sources: Vec<Box<dyn ValueSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl ValueSource for ChainedValues {
    async fn resolve(&self, name: &str) -> Result<Option<String>, ValueSourceError> {
        for source in &self.sources {
            if let Some(value) = source.resolve(name).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
