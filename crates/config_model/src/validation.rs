//! Configuration validation.
//!
//! Validation runs after the extends chain is resolved and before any
//! comparator touches the network. A validation failure aborts the run.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::RepoConfig;
use crate::errors::{ConfigError, ConfigResult};

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;

/// GitHub naming rule for Actions secrets and variables.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Prefix reserved by GitHub; secrets and variables cannot start with it.
const RESERVED_PREFIX: &str = "GITHUB_";

/// Validates an effective configuration document.
///
/// Checks every secret and variable name against GitHub's naming rules:
/// the name must start with a letter or underscore, contain only
/// alphanumeric characters and underscores, and must not use the reserved
/// `GITHUB_` prefix.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidName`] naming the first offending entry.
pub fn validate(config: &RepoConfig) -> ConfigResult<()> {
    if let Some(secrets) = &config.secrets {
        for name in secrets {
            validate_name("secret", name)?;
        }
    }
    if let Some(env) = &config.env {
        for name in env.secret_names() {
            validate_name("secret", name)?;
        }
        if let Some(variables) = &env.variables {
            for name in variables.keys() {
                validate_name("variable", name)?;
            }
        }
    }
    Ok(())
}

fn validate_name(kind: &'static str, name: &str) -> ConfigResult<()> {
    if !NAME_PATTERN.is_match(name) {
        return Err(ConfigError::InvalidName {
            kind,
            name: name.to_string(),
            reason: "names must start with a letter or underscore and contain only \
                     alphanumeric characters or underscores"
                .to_string(),
        });
    }
    if name.to_ascii_uppercase().starts_with(RESERVED_PREFIX) {
        return Err(ConfigError::InvalidName {
            kind,
            name: name.to_string(),
            reason: format!("the {RESERVED_PREFIX} prefix is reserved"),
        });
    }
    Ok(())
}
