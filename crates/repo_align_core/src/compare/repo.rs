//! Scalar repository settings comparator.

use config_model::RepoSettings;
use github_gateway::RepoStateGateway;

use super::{gateway_error, push_flag};
use crate::change::{Category, Change};
use crate::errors::AlignResult;

const CATEGORY: Category = Category::Repo;

pub(crate) async fn compare(
    desired: &RepoSettings,
    gateway: &dyn RepoStateGateway,
) -> AlignResult<Vec<Change>> {
    let current = gateway
        .get_repository()
        .await
        .map_err(gateway_error(CATEGORY))?;

    let mut changes = Vec::new();
    push_string(
        &mut changes,
        "description",
        &desired.description,
        &current.description,
    );
    push_string(&mut changes, "homepage", &desired.homepage, &current.homepage);

    if let Some(visibility) = desired.visibility {
        let current_visibility = current.visibility.as_deref().unwrap_or("");
        let desired_visibility = visibility.to_string();
        if desired_visibility != current_visibility {
            changes.push(Change::update(
                CATEGORY,
                "visibility",
                current_visibility,
                desired_visibility,
            ));
        }
    }

    push_flag(
        &mut changes,
        CATEGORY,
        "allow_squash_merge",
        desired.allow_squash_merge,
        current.allow_squash_merge.unwrap_or(false),
    );
    push_flag(
        &mut changes,
        CATEGORY,
        "allow_merge_commit",
        desired.allow_merge_commit,
        current.allow_merge_commit.unwrap_or(false),
    );
    push_flag(
        &mut changes,
        CATEGORY,
        "allow_rebase_merge",
        desired.allow_rebase_merge,
        current.allow_rebase_merge.unwrap_or(false),
    );
    push_flag(
        &mut changes,
        CATEGORY,
        "allow_auto_merge",
        desired.allow_auto_merge,
        current.allow_auto_merge.unwrap_or(false),
    );
    push_flag(
        &mut changes,
        CATEGORY,
        "delete_branch_on_merge",
        desired.delete_branch_on_merge,
        current.delete_branch_on_merge.unwrap_or(false),
    );

    Ok(changes)
}

/// String fields compare by dereferenced value; an absent current value
/// displays as the empty string and only a set desired field can drive a
/// change.
fn push_string(
    changes: &mut Vec<Change>,
    key: &str,
    desired: &Option<String>,
    current: &Option<String>,
) {
    if let Some(value) = desired {
        let current_value = current.as_deref().unwrap_or("");
        if value != current_value {
            changes.push(Change::update(CATEGORY, key, current_value, value.clone()));
        }
    }
}
