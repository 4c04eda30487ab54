//! Command implementations and the argument surface they share.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use config_model::{DocumentLoader, ExtendsResolver, Loader, ReferenceBase};
use github_gateway::GitHubGateway;
use repo_align_core::{PlanOptions, StaticValues};

use crate::env_file;
use crate::errors::Error;

pub mod apply_cmd;
pub mod plan_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

const DEFAULT_CONFIG_PATH: &str = ".github/repo-align.yml";
const DEFAULT_ENV_FILE: &str = ".env";

/// The `kind` of a configured external secret provider, if any.
///
/// Providers are parsed and merged but not consulted: secret and variable
/// values only come from the process environment and the env file. Callers
/// warn when a configuration carries one so the setting is not silently
/// ignored.
pub fn unsupported_secret_provider(config: &config_model::RepoConfig) -> Option<&str> {
    config
        .env
        .as_ref()?
        .provider
        .as_ref()
        .map(|provider| provider.kind.as_str())
}

/// Arguments shared by `plan` and `apply`.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Path to the configuration document.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Repository owner (user or organization).
    #[arg(long)]
    pub owner: String,

    /// Repository name.
    #[arg(long)]
    pub repo: String,

    /// GitHub token; falls back to the GITHUB_TOKEN environment variable.
    #[arg(long)]
    pub token: Option<String>,

    /// Env file providing secret and variable values; `.env` is used by
    /// default when it exists.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Compare required secrets against the repository.
    #[arg(long)]
    pub check_secrets: bool,

    /// Compare environment variables against the repository.
    #[arg(long)]
    pub check_env: bool,

    /// Plan deletions for remote entries the configuration does not name.
    #[arg(long)]
    pub sync_delete: bool,

    /// Emit the plan report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl TargetArgs {
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            check_secrets: self.check_secrets,
            check_env: self.check_env,
            sync_delete: self.sync_delete,
        }
    }

    pub fn gateway(&self) -> Result<GitHubGateway, Error> {
        let token = match &self.token {
            Some(token) => token.clone(),
            None => std::env::var("GITHUB_TOKEN").map_err(|_| Error::MissingToken)?,
        };
        Ok(GitHubGateway::from_token(token, &self.owner, &self.repo)?)
    }

    /// Loads the configuration document and flattens its extends chain.
    pub async fn effective_config(&self) -> Result<config_model::RepoConfig, Error> {
        let loader = Loader::new()?;
        let doc = loader.load_local(&self.config).await?;
        let base = ReferenceBase::Dir(
            self.config
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
        );
        let resolver = ExtendsResolver::new(loader);
        Ok(resolver.resolve(doc, base).await?)
    }

    /// Builds the local value store: process environment overlaid with the
    /// env file, so file entries win.
    pub fn values(&self) -> Result<StaticValues, Error> {
        let mut values: HashMap<String, String> = std::env::vars().collect();
        match &self.env_file {
            Some(path) => values.extend(env_file::load(path)?),
            None => {
                let default = Path::new(DEFAULT_ENV_FILE);
                if default.exists() {
                    debug!(path = DEFAULT_ENV_FILE, "loading default env file");
                    values.extend(env_file::load(default)?);
                }
            }
        }
        Ok(StaticValues::from(values))
    }
}
