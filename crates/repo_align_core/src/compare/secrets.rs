//! Secrets comparator.
//!
//! Secret values cannot be read back from GitHub, so this comparator only
//! reconciles presence. A desired secret absent from the repository becomes
//! an Add when a value is resolvable locally and a Missing otherwise;
//! Missing signals that an operator action is required. With sync-delete
//! enabled, remote secrets absent from the configuration become Deletes.
//! Changes never carry secret values.

use std::collections::HashSet;

use github_gateway::RepoStateGateway;

use super::gateway_error;
use crate::change::{Category, Change};
use crate::errors::{AlignError, AlignResult};
use crate::values::ValueSource;

const CATEGORY: Category = Category::Secrets;

pub(crate) async fn compare(
    desired: &[String],
    gateway: &dyn RepoStateGateway,
    values: &dyn ValueSource,
    sync_delete: bool,
) -> AlignResult<Vec<Change>> {
    let current = gateway
        .list_secret_names()
        .await
        .map_err(gateway_error(CATEGORY))?;
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    let mut changes = Vec::new();
    for name in desired {
        if current_set.contains(name.as_str()) {
            continue;
        }
        let resolved = values.resolve(name).await.map_err(|err| AlignError::Value {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        if resolved.is_some() {
            changes.push(Change {
                kind: crate::change::ChangeKind::Add,
                category: CATEGORY,
                key: name.clone(),
                old: None,
                new: None,
            });
        } else {
            changes.push(Change::missing(CATEGORY, name.clone()));
        }
    }

    if sync_delete {
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();
        for name in &current {
            if !desired_set.contains(name.as_str()) {
                changes.push(Change {
                    kind: crate::change::ChangeKind::Delete,
                    category: CATEGORY,
                    key: name.clone(),
                    old: None,
                    new: None,
                });
            }
        }
    }

    Ok(changes)
}
