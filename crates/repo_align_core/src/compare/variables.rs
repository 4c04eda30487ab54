//! Variables comparator.
//!
//! The effective desired value of a variable is the local override when the
//! value store has one, otherwise the default from the configuration file.
//! Unlike secrets, variable values are readable remotely and compare
//! directly.

use std::collections::{BTreeMap, HashMap, HashSet};

use github_gateway::RepoStateGateway;

use super::gateway_error;
use crate::change::{Category, Change};
use crate::errors::{AlignError, AlignResult};
use crate::values::ValueSource;

const CATEGORY: Category = Category::Variables;

pub(crate) async fn compare(
    desired: &BTreeMap<String, String>,
    gateway: &dyn RepoStateGateway,
    values: &dyn ValueSource,
    sync_delete: bool,
) -> AlignResult<Vec<Change>> {
    let current = gateway
        .list_variables()
        .await
        .map_err(gateway_error(CATEGORY))?;
    let current_by_name: HashMap<&str, &str> = current
        .iter()
        .map(|variable| (variable.name.as_str(), variable.value.as_str()))
        .collect();

    let mut changes = Vec::new();
    for (name, default_value) in desired {
        let override_value = values.resolve(name).await.map_err(|err| AlignError::Value {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        let effective = override_value.unwrap_or_else(|| default_value.clone());

        match current_by_name.get(name.as_str()) {
            Some(current_value) => {
                if effective != *current_value {
                    changes.push(Change::update(
                        CATEGORY,
                        name.clone(),
                        (*current_value).to_string(),
                        effective,
                    ));
                }
            }
            None => {
                changes.push(Change::add(CATEGORY, name.clone(), effective));
            }
        }
    }

    if sync_delete {
        let desired_set: HashSet<&str> = desired.keys().map(String::as_str).collect();
        for variable in &current {
            if !desired_set.contains(variable.name.as_str()) {
                changes.push(Change::delete(
                    CATEGORY,
                    variable.name.clone(),
                    variable.value.clone(),
                ));
            }
        }
    }

    Ok(changes)
}
