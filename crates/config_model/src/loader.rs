//! Document loading from the filesystem and over HTTP.
//!
//! The [`DocumentLoader`] trait is the seam between the extends resolver and
//! the outside world; tests substitute an in-memory implementation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::document::RepoConfig;
use crate::errors::{ConfigError, ConfigResult};

/// Fixed timeout for extends-chain HTTP fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads referenced configuration documents.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Loads and parses a document from a local file.
    async fn load_local(&self, path: &Path) -> ConfigResult<RepoConfig>;

    /// Loads and parses a document from a URL.
    async fn load_remote(&self, url: &Url) -> ConfigResult<RepoConfig>;
}

/// Parses a YAML document body.
///
/// An empty body parses to an empty document rather than erroring, so an
/// extends chain can reference placeholder files.
pub fn parse_document(source_name: &str, body: &str) -> ConfigResult<RepoConfig> {
    if body.trim().is_empty() {
        return Ok(RepoConfig::new());
    }
    serde_yaml::from_str(body).map_err(|err| ConfigError::Parse {
        source_name: source_name.to_string(),
        reason: err.to_string(),
    })
}

/// Production loader backed by `tokio::fs` and `reqwest`.
pub struct Loader {
    http: reqwest::Client,
}

impl Loader {
    /// Creates a loader with the fixed 30 second fetch timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FetchFailed`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> ConfigResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|err| ConfigError::FetchFailed {
                url: String::new(),
                reason: format!("failed to construct HTTP client: {err}"),
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl DocumentLoader for Loader {
    async fn load_local(&self, path: &Path) -> ConfigResult<RepoConfig> {
        debug!(path = %path.display(), "loading local configuration document");
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ConfigError::FileAccess {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
        parse_document(&path.display().to_string(), &body)
    }

    async fn load_remote(&self, url: &Url) -> ConfigResult<RepoConfig> {
        debug!(url = %url, "fetching remote configuration document");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| ConfigError::FetchFailed {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|err| ConfigError::FetchFailed {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        parse_document(url.as_str(), &body)
    }
}
