//! Actions permissions comparator.
//!
//! Compares the top-level permission fields, the selected-actions policy
//! (only when the configuration carries one) and the workflow token
//! permissions (only when one of its fields is set). The pattern list of a
//! selected-actions policy compares with exact order, unlike the
//! order-insensitive topics and status-check comparisons.

use config_model::ActionsSettings;
use github_gateway::RepoStateGateway;

use super::{display_list, gateway_error, push_flag};
use crate::change::{Category, Change};
use crate::errors::AlignResult;

const CATEGORY: Category = Category::Actions;

pub(crate) async fn compare(
    desired: &ActionsSettings,
    gateway: &dyn RepoStateGateway,
) -> AlignResult<Vec<Change>> {
    let current = gateway
        .get_actions_permissions()
        .await
        .map_err(gateway_error(CATEGORY))?;

    let mut changes = Vec::new();
    push_flag(
        &mut changes,
        CATEGORY,
        "enabled",
        desired.enabled,
        current.enabled,
    );

    if let Some(allowed) = desired.allowed_actions {
        let current_allowed = current.allowed_actions.as_deref().unwrap_or("");
        let desired_allowed = allowed.to_string();
        if desired_allowed != current_allowed {
            changes.push(Change::update(
                CATEGORY,
                "allowed_actions",
                current_allowed,
                desired_allowed,
            ));
        }
    }

    if let Some(selected) = &desired.selected_actions {
        let current_selected = gateway
            .get_selected_actions()
            .await
            .map_err(gateway_error(CATEGORY))?;
        push_flag(
            &mut changes,
            CATEGORY,
            "github_owned_allowed",
            selected.github_owned_allowed,
            current_selected.github_owned_allowed,
        );
        push_flag(
            &mut changes,
            CATEGORY,
            "verified_allowed",
            selected.verified_allowed,
            current_selected.verified_allowed,
        );
        if let Some(patterns) = &selected.patterns_allowed {
            if *patterns != current_selected.patterns_allowed {
                changes.push(Change::update(
                    CATEGORY,
                    "patterns_allowed",
                    display_list(&current_selected.patterns_allowed),
                    display_list(patterns),
                ));
            }
        }
    }

    if desired.default_workflow_permissions.is_some()
        || desired.can_approve_pull_request_reviews.is_some()
    {
        let workflow = gateway
            .get_workflow_permissions()
            .await
            .map_err(gateway_error(CATEGORY))?;
        if let Some(permission) = desired.default_workflow_permissions {
            let desired_permission = permission.to_string();
            if desired_permission != workflow.default_workflow_permissions {
                changes.push(Change::update(
                    CATEGORY,
                    "default_workflow_permissions",
                    workflow.default_workflow_permissions.clone(),
                    desired_permission,
                ));
            }
        }
        push_flag(
            &mut changes,
            CATEGORY,
            "can_approve_pull_request_reviews",
            desired.can_approve_pull_request_reviews,
            workflow.can_approve_pull_request_reviews,
        );
    }

    Ok(changes)
}
