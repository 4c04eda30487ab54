//! Labels comparator.
//!
//! Desired labels are matched to current labels by name: a match with a
//! different color or description becomes an Update, no match becomes an
//! Add. When `replace_default` is set, current labels absent from the
//! desired list become Deletes; otherwise they are left untouched.
//!
//! Descriptions compare with absent normalized to the empty string on both
//! sides, and colors compare case-insensitively.

use std::collections::HashMap;

use config_model::{LabelConfig, LabelSettings};
use github_gateway::{LabelState, RepoStateGateway};

use super::gateway_error;
use crate::change::{Category, Change};
use crate::errors::AlignResult;

const CATEGORY: Category = Category::Labels;

pub(crate) async fn compare(
    desired: &LabelSettings,
    gateway: &dyn RepoStateGateway,
) -> AlignResult<Vec<Change>> {
    let current = gateway.get_labels().await.map_err(gateway_error(CATEGORY))?;
    let current_by_name: HashMap<&str, &LabelState> = current
        .iter()
        .map(|label| (label.name.as_str(), label))
        .collect();

    let mut changes = Vec::new();
    for item in &desired.items {
        match current_by_name.get(item.name.as_str()) {
            Some(existing) => {
                if differs(item, existing) {
                    changes.push(Change::update(
                        CATEGORY,
                        item.name.clone(),
                        display_state(existing),
                        display_config(item),
                    ));
                }
            }
            None => {
                changes.push(Change::add(CATEGORY, item.name.clone(), display_config(item)));
            }
        }
    }

    if desired.replace_default() {
        for label in &current {
            let keep = desired.items.iter().any(|item| item.name == label.name);
            if !keep {
                changes.push(Change::delete(
                    CATEGORY,
                    label.name.clone(),
                    display_state(label),
                ));
            }
        }
    }

    Ok(changes)
}

fn differs(desired: &LabelConfig, current: &LabelState) -> bool {
    !desired.color.eq_ignore_ascii_case(&current.color)
        || desired.description_normalized() != current.description_normalized()
}

fn display_config(label: &LabelConfig) -> String {
    display(&label.color, label.description_normalized())
}

fn display_state(label: &LabelState) -> String {
    display(&label.color, label.description_normalized())
}

fn display(color: &str, description: &str) -> String {
    if description.is_empty() {
        format!("#{color}")
    } else {
        format!("#{color} {description}")
    }
}
