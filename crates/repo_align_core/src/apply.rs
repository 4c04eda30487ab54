//! Plan execution.
//!
//! Walks a calculated plan in category order and pushes the desired state
//! through the gateway mutators. For full-body endpoints (actions
//! permissions, workflow permissions) the current remote value is fetched
//! first and only the configured fields are overlaid, so apply never
//! clobbers settings the configuration does not manage.
//!
//! Secret values are one exception: GitHub requires sealed-box encryption
//! against the repository public key to write them, so Add and Missing
//! secret changes are reported back as operator actions instead of being
//! pushed. Secret deletions are applied normally. Push restrictions and
//! required deployment environments are the other: the protection endpoint
//! needs user/team allow lists respectively rulesets to express them, so
//! their changes are counted as skipped rather than silently dropped.

use config_model::{BranchRule, RepoConfig};
use github_gateway::{
    ActionsPermissionsPayload, BranchProtectionPayload, LabelPayload, PagesSourcePayload,
    PagesUpdatePayload, RepoStateGateway, RepoUpdatePayload, ReviewRequirementPayload,
    SelectedActionsPayload, StatusCheckPayload, VariablePayload, WorkflowPermissionsPayload,
};
use tracing::{info, warn};

use crate::change::{Category, Change, ChangeKind};
use crate::errors::{AlignError, AlignResult};
use crate::plan::Plan;

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;

/// Outcome of one apply run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    /// Mutations pushed to the repository.
    pub applied: usize,
    /// Changes that require an operator action and were not pushed.
    pub skipped: usize,
}

/// Applies a calculated plan to the live repository.
///
/// `config` must be the same effective configuration the plan was
/// calculated from; payloads are built from its desired values.
///
/// # Errors
///
/// The first failed mutation aborts the run with the category named.
pub async fn apply_plan(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    plan: &Plan,
) -> AlignResult<ApplyReport> {
    let mut report = ApplyReport::default();

    for category in Category::ALL {
        let changes: Vec<&Change> = plan
            .changes()
            .iter()
            .filter(|change| change.category == category)
            .collect();
        if changes.is_empty() {
            continue;
        }
        info!(category = %category, changes = changes.len(), "applying changes");
        match category {
            Category::Repo => apply_repo(gateway, config, &mut report).await?,
            Category::Topics => apply_topics(gateway, config, &mut report).await?,
            Category::Labels => apply_labels(gateway, config, &changes, &mut report).await?,
            Category::BranchProtection => {
                apply_branch_protection(gateway, config, &changes, &mut report).await?
            }
            Category::Secrets => apply_secrets(gateway, &changes, &mut report).await?,
            Category::Variables => apply_variables(gateway, &changes, &mut report).await?,
            Category::Actions => apply_actions(gateway, config, &mut report).await?,
            Category::Pages => apply_pages(gateway, config, &mut report).await?,
        }
    }

    Ok(report)
}

fn apply_error(category: Category) -> impl FnOnce(github_gateway::Error) -> AlignError {
    move |source| AlignError::Apply { category, source }
}

async fn apply_repo(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    report: &mut ApplyReport,
) -> AlignResult<()> {
    let Some(repo) = &config.repo else {
        return Ok(());
    };
    let payload = RepoUpdatePayload {
        description: repo.description.clone(),
        homepage: repo.homepage.clone(),
        visibility: repo.visibility.map(|visibility| visibility.to_string()),
        allow_squash_merge: repo.allow_squash_merge,
        allow_merge_commit: repo.allow_merge_commit,
        allow_rebase_merge: repo.allow_rebase_merge,
        allow_auto_merge: repo.allow_auto_merge,
        delete_branch_on_merge: repo.delete_branch_on_merge,
    };
    gateway
        .update_repository(&payload)
        .await
        .map_err(apply_error(Category::Repo))?;
    report.applied += 1;
    Ok(())
}

async fn apply_topics(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    report: &mut ApplyReport,
) -> AlignResult<()> {
    let Some(topics) = &config.topics else {
        return Ok(());
    };
    gateway
        .replace_topics(topics)
        .await
        .map_err(apply_error(Category::Topics))?;
    report.applied += 1;
    Ok(())
}

async fn apply_labels(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    changes: &[&Change],
    report: &mut ApplyReport,
) -> AlignResult<()> {
    let items = config
        .labels
        .as_ref()
        .map(|labels| labels.items.as_slice())
        .unwrap_or(&[]);

    for change in changes {
        match change.kind {
            ChangeKind::Add | ChangeKind::Update => {
                let Some(item) = items.iter().find(|item| item.name == change.key) else {
                    continue;
                };
                let payload = LabelPayload {
                    name: item.name.clone(),
                    color: item.color.clone(),
                    description: item.description_normalized().to_string(),
                };
                if change.kind == ChangeKind::Add {
                    gateway
                        .create_label(&payload)
                        .await
                        .map_err(apply_error(Category::Labels))?;
                } else {
                    gateway
                        .update_label(&change.key, &payload)
                        .await
                        .map_err(apply_error(Category::Labels))?;
                }
                report.applied += 1;
            }
            ChangeKind::Delete => {
                gateway
                    .delete_label(&change.key)
                    .await
                    .map_err(apply_error(Category::Labels))?;
                report.applied += 1;
            }
            ChangeKind::Missing => {}
        }
    }
    Ok(())
}

/// Protection fields the REST endpoint cannot express without user/team
/// allow lists or rulesets; their changes are reported as skipped.
fn is_unsupported_protection_field(key: &str) -> bool {
    key.ends_with(".restrict_pushes") || key.ends_with(".required_deployment_environments")
}

async fn apply_branch_protection(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    changes: &[&Change],
    report: &mut ApplyReport,
) -> AlignResult<()> {
    for change in changes {
        if is_unsupported_protection_field(&change.key) {
            warn!(
                field = change.key.as_str(),
                "protection field must be set manually"
            );
            report.skipped += 1;
        }
    }

    let Some(rules) = &config.branch_protection else {
        return Ok(());
    };
    // Branch names may contain dots, so change keys cannot be mapped back
    // to branches reliably; the PUT is idempotent and every configured
    // branch is written instead.
    for (branch, rule) in rules {
        let payload = protection_payload(rule);
        gateway
            .put_branch_protection(branch, &payload)
            .await
            .map_err(apply_error(Category::BranchProtection))?;
        report.applied += 1;
        if let Some(required) = rule.require_signed_commits {
            gateway
                .set_required_signatures(branch, required)
                .await
                .map_err(apply_error(Category::BranchProtection))?;
            report.applied += 1;
        }
    }
    Ok(())
}

fn protection_payload(rule: &BranchRule) -> BranchProtectionPayload {
    let wants_status_checks = rule.require_status_checks == Some(true)
        || rule
            .status_checks
            .as_ref()
            .is_some_and(|checks| !checks.is_empty());
    let wants_reviews = rule.required_reviews.is_some()
        || rule.dismiss_stale_reviews.is_some()
        || rule.require_code_owner_reviews.is_some();

    BranchProtectionPayload {
        required_status_checks: wants_status_checks.then(|| StatusCheckPayload {
            strict: rule.strict_status_checks.unwrap_or(false),
            contexts: rule.status_checks.clone().unwrap_or_default(),
        }),
        enforce_admins: rule.enforce_admins,
        required_pull_request_reviews: wants_reviews.then(|| ReviewRequirementPayload {
            required_approving_review_count: rule.required_reviews.unwrap_or(0),
            dismiss_stale_reviews: rule.dismiss_stale_reviews.unwrap_or(false),
            require_code_owner_reviews: rule.require_code_owner_reviews.unwrap_or(false),
        }),
        restrictions: None,
        required_linear_history: rule.require_linear_history,
        allow_force_pushes: rule.allow_force_pushes,
        allow_deletions: rule.allow_deletions,
        block_creations: rule.restrict_creations,
    }
}

async fn apply_secrets(
    gateway: &dyn RepoStateGateway,
    changes: &[&Change],
    report: &mut ApplyReport,
) -> AlignResult<()> {
    for change in changes {
        match change.kind {
            ChangeKind::Delete => {
                gateway
                    .delete_secret(&change.key)
                    .await
                    .map_err(apply_error(Category::Secrets))?;
                report.applied += 1;
            }
            ChangeKind::Add | ChangeKind::Missing => {
                warn!(
                    secret = change.key.as_str(),
                    "secret value must be set manually"
                );
                report.skipped += 1;
            }
            ChangeKind::Update => {}
        }
    }
    Ok(())
}

async fn apply_variables(
    gateway: &dyn RepoStateGateway,
    changes: &[&Change],
    report: &mut ApplyReport,
) -> AlignResult<()> {
    for change in changes {
        match change.kind {
            ChangeKind::Add | ChangeKind::Update => {
                let Some(value) = &change.new else {
                    continue;
                };
                let payload = VariablePayload {
                    name: change.key.clone(),
                    value: value.clone(),
                };
                if change.kind == ChangeKind::Add {
                    gateway
                        .create_variable(&payload)
                        .await
                        .map_err(apply_error(Category::Variables))?;
                } else {
                    gateway
                        .update_variable(&payload)
                        .await
                        .map_err(apply_error(Category::Variables))?;
                }
                report.applied += 1;
            }
            ChangeKind::Delete => {
                gateway
                    .delete_variable(&change.key)
                    .await
                    .map_err(apply_error(Category::Variables))?;
                report.applied += 1;
            }
            ChangeKind::Missing => {
                report.skipped += 1;
            }
        }
    }
    Ok(())
}

async fn apply_actions(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    report: &mut ApplyReport,
) -> AlignResult<()> {
    let Some(actions) = &config.actions else {
        return Ok(());
    };

    if actions.enabled.is_some() || actions.allowed_actions.is_some() {
        let current = gateway
            .get_actions_permissions()
            .await
            .map_err(apply_error(Category::Actions))?;
        let payload = ActionsPermissionsPayload {
            enabled: actions.enabled.unwrap_or(current.enabled),
            allowed_actions: actions
                .allowed_actions
                .map(|allowed| allowed.to_string())
                .or(current.allowed_actions),
        };
        gateway
            .set_actions_permissions(&payload)
            .await
            .map_err(apply_error(Category::Actions))?;
        report.applied += 1;
    }

    if let Some(selected) = &actions.selected_actions {
        let current = gateway
            .get_selected_actions()
            .await
            .map_err(apply_error(Category::Actions))?;
        let payload = SelectedActionsPayload {
            github_owned_allowed: selected
                .github_owned_allowed
                .unwrap_or(current.github_owned_allowed),
            verified_allowed: selected.verified_allowed.unwrap_or(current.verified_allowed),
            patterns_allowed: selected
                .patterns_allowed
                .clone()
                .unwrap_or(current.patterns_allowed),
        };
        gateway
            .set_selected_actions(&payload)
            .await
            .map_err(apply_error(Category::Actions))?;
        report.applied += 1;
    }

    if actions.default_workflow_permissions.is_some()
        || actions.can_approve_pull_request_reviews.is_some()
    {
        let current = gateway
            .get_workflow_permissions()
            .await
            .map_err(apply_error(Category::Actions))?;
        let payload = WorkflowPermissionsPayload {
            default_workflow_permissions: actions
                .default_workflow_permissions
                .map(|permission| permission.to_string())
                .unwrap_or(current.default_workflow_permissions),
            can_approve_pull_request_reviews: actions
                .can_approve_pull_request_reviews
                .unwrap_or(current.can_approve_pull_request_reviews),
        };
        gateway
            .set_workflow_permissions(&payload)
            .await
            .map_err(apply_error(Category::Actions))?;
        report.applied += 1;
    }

    Ok(())
}

async fn apply_pages(
    gateway: &dyn RepoStateGateway,
    config: &RepoConfig,
    report: &mut ApplyReport,
) -> AlignResult<()> {
    let Some(pages) = &config.pages else {
        return Ok(());
    };
    let payload = PagesUpdatePayload {
        build_type: pages.build_type.map(|build_type| build_type.to_string()),
        source: pages.source.as_ref().map(|source| PagesSourcePayload {
            branch: source.branch.clone(),
            path: source.path.clone(),
        }),
    };
    gateway
        .update_pages(&payload)
        .await
        .map_err(apply_error(Category::Pages))?;
    report.applied += 1;
    Ok(())
}
