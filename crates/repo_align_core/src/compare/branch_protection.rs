//! Branch protection comparator.
//!
//! Each configured branch is fetched separately. A gateway answer of
//! [`github_gateway::Error::NotConfigured`] means the branch is not yet
//! protected and becomes a single Add summarizing the whole desired rule;
//! any other error aborts. A protected branch compares field by field with
//! `"<branch>.<field>"` keys, treating absent current sub-records as their
//! natural off defaults.

use std::collections::BTreeMap;

use config_model::BranchRule;
use github_gateway::{BranchProtectionState, RepoStateGateway};

use super::{display_list, gateway_error, push_flag, sorted};
use crate::change::{Category, Change};
use crate::errors::AlignResult;

const CATEGORY: Category = Category::BranchProtection;

pub(crate) async fn compare(
    desired: &BTreeMap<String, BranchRule>,
    gateway: &dyn RepoStateGateway,
) -> AlignResult<Vec<Change>> {
    let mut changes = Vec::new();
    for (branch, rule) in desired {
        match gateway.get_branch_protection(branch).await {
            Ok(current) => compare_rule(&mut changes, branch, rule, &current),
            Err(github_gateway::Error::NotConfigured) => {
                changes.push(Change::add(CATEGORY, branch.clone(), summarize_rule(rule)));
            }
            Err(err) => return Err(gateway_error(CATEGORY)(err)),
        }
    }
    Ok(changes)
}

/// Compact `key=value` summary of the concretely-set fields of a rule,
/// used as the display value of a whole-rule Add. A rule with nothing
/// concretely set (no true flag, non-zero count or non-empty list) renders
/// as the literal `"new protection"`.
fn summarize_rule(rule: &BranchRule) -> String {
    let mut parts = Vec::new();
    if let Some(count) = rule.required_reviews {
        if count > 0 {
            parts.push(format!("required_reviews={count}"));
        }
    }
    push_set_flag(&mut parts, "dismiss_stale_reviews", rule.dismiss_stale_reviews);
    push_set_flag(
        &mut parts,
        "require_code_owner_reviews",
        rule.require_code_owner_reviews,
    );
    push_set_flag(&mut parts, "require_status_checks", rule.require_status_checks);
    if let Some(checks) = &rule.status_checks {
        if !checks.is_empty() {
            parts.push(format!("status_checks={}", checks.join(",")));
        }
    }
    push_set_flag(&mut parts, "strict_status_checks", rule.strict_status_checks);
    if let Some(environments) = &rule.required_deployment_environments {
        if !environments.is_empty() {
            parts.push(format!(
                "required_deployment_environments={}",
                environments.join(",")
            ));
        }
    }
    push_set_flag(&mut parts, "require_signed_commits", rule.require_signed_commits);
    push_set_flag(&mut parts, "require_linear_history", rule.require_linear_history);
    push_set_flag(&mut parts, "enforce_admins", rule.enforce_admins);
    push_set_flag(&mut parts, "restrict_creations", rule.restrict_creations);
    push_set_flag(&mut parts, "restrict_pushes", rule.restrict_pushes);
    push_set_flag(&mut parts, "allow_force_pushes", rule.allow_force_pushes);
    push_set_flag(&mut parts, "allow_deletions", rule.allow_deletions);

    if parts.is_empty() {
        "new protection".to_string()
    } else {
        parts.join(" ")
    }
}

fn push_set_flag(parts: &mut Vec<String>, name: &str, flag: Option<bool>) {
    if flag == Some(true) {
        parts.push(format!("{name}=true"));
    }
}

fn compare_rule(
    changes: &mut Vec<Change>,
    branch: &str,
    rule: &BranchRule,
    current: &BranchProtectionState,
) {
    let key = |field: &str| format!("{branch}.{field}");

    let reviews = current.required_pull_request_reviews.clone().unwrap_or_default();
    if let Some(count) = rule.required_reviews {
        if count != reviews.required_approving_review_count {
            changes.push(Change::update(
                CATEGORY,
                key("required_reviews"),
                reviews.required_approving_review_count.to_string(),
                count.to_string(),
            ));
        }
    }
    push_flag(
        changes,
        CATEGORY,
        key("dismiss_stale_reviews"),
        rule.dismiss_stale_reviews,
        reviews.dismiss_stale_reviews,
    );
    push_flag(
        changes,
        CATEGORY,
        key("require_code_owner_reviews"),
        rule.require_code_owner_reviews,
        reviews.require_code_owner_reviews,
    );

    let checks = current.required_status_checks.clone().unwrap_or_default();
    push_flag(
        changes,
        CATEGORY,
        key("require_status_checks"),
        rule.require_status_checks,
        current.required_status_checks.is_some(),
    );
    if let Some(desired_checks) = &rule.status_checks {
        // Contexts are order-insensitive on the GitHub side.
        if sorted(desired_checks) != sorted(&checks.contexts) {
            changes.push(Change::update(
                CATEGORY,
                key("status_checks"),
                display_list(&sorted(&checks.contexts)),
                display_list(&sorted(desired_checks)),
            ));
        }
    }
    push_flag(
        changes,
        CATEGORY,
        key("strict_status_checks"),
        rule.strict_status_checks,
        checks.strict,
    );

    if let Some(environments) = &rule.required_deployment_environments {
        let current_environments = current
            .required_deployment_environments
            .clone()
            .unwrap_or_default();
        if sorted(environments) != sorted(&current_environments) {
            changes.push(Change::update(
                CATEGORY,
                key("required_deployment_environments"),
                display_list(&sorted(&current_environments)),
                display_list(&sorted(environments)),
            ));
        }
    }

    push_flag(
        changes,
        CATEGORY,
        key("require_signed_commits"),
        rule.require_signed_commits,
        current.required_signatures,
    );
    push_flag(
        changes,
        CATEGORY,
        key("require_linear_history"),
        rule.require_linear_history,
        current.required_linear_history,
    );
    push_flag(
        changes,
        CATEGORY,
        key("enforce_admins"),
        rule.enforce_admins,
        current.enforce_admins,
    );
    push_flag(
        changes,
        CATEGORY,
        key("restrict_creations"),
        rule.restrict_creations,
        current.restrict_creations,
    );
    push_flag(
        changes,
        CATEGORY,
        key("restrict_pushes"),
        rule.restrict_pushes,
        current.restrict_pushes,
    );
    push_flag(
        changes,
        CATEGORY,
        key("allow_force_pushes"),
        rule.allow_force_pushes,
        current.allow_force_pushes,
    );
    push_flag(
        changes,
        CATEGORY,
        key("allow_deletions"),
        rule.allow_deletions,
        current.allow_deletions,
    );
}
