//! `.env`-style file parsing.
//!
//! Secret and variable values come from a local env file so they never live
//! in the configuration document. The format is one `KEY=VALUE` pair per
//! line; blank lines and `#` comments are ignored, values may be wrapped in
//! single or double quotes, and an optional `export ` prefix is accepted.

use std::collections::HashMap;
use std::path::Path;

use crate::errors::Error;

#[cfg(test)]
#[path = "env_file_tests.rs"]
mod tests;

/// Reads and parses an env file into a name/value map.
///
/// # Errors
///
/// Returns [`Error::EnvFile`] when the file cannot be read or a line is not
/// a `KEY=VALUE` pair.
pub fn load(path: &Path) -> Result<HashMap<String, String>, Error> {
    let body = std::fs::read_to_string(path).map_err(|err| Error::EnvFile {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    parse(&body).map_err(|reason| Error::EnvFile {
        path: path.display().to_string(),
        reason,
    })
}

/// Parses env file content. Later lines override earlier ones.
pub fn parse(body: &str) -> Result<HashMap<String, String>, String> {
    let mut values = HashMap::new();
    for (index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            return Err(format!("line {}: expected KEY=VALUE", index + 1));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("line {}: empty key", index + 1));
        }
        values.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    Ok(values)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
