//! Live-state models and mutation payloads.
//!
//! The state structs are the gateway's view of what is currently configured
//! on the repository, flattened from the wire shapes GitHub uses (several
//! protection fields arrive as `{ "enabled": bool }` wrappers). The payload
//! structs are the bodies sent back on apply.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Scalar repository settings as reported by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RepoState {
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub visibility: Option<String>,
    pub allow_squash_merge: Option<bool>,
    pub allow_merge_commit: Option<bool>,
    pub allow_rebase_merge: Option<bool>,
    pub allow_auto_merge: Option<bool>,
    pub delete_branch_on_merge: Option<bool>,
}

/// One label currently present on the repository.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LabelState {
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

impl LabelState {
    /// Description with null normalized to the empty string, matching the
    /// canonical form used on the desired side.
    pub fn description_normalized(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Pull request review requirements of a protection rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequirementState {
    pub required_approving_review_count: u32,
    pub dismiss_stale_reviews: bool,
    pub require_code_owner_reviews: bool,
}

/// Status check requirements of a protection rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCheckState {
    pub strict: bool,
    pub contexts: Vec<String>,
}

/// Flattened branch protection state.
///
/// Absent sub-records mean the corresponding requirement is switched off
/// remotely; comparators treat them as their natural "off" defaults.
#[derive(Debug, Clone, Default)]
pub struct BranchProtectionState {
    pub required_pull_request_reviews: Option<ReviewRequirementState>,
    pub required_status_checks: Option<StatusCheckState>,
    pub required_deployment_environments: Option<Vec<String>>,
    pub required_signatures: bool,
    pub required_linear_history: bool,
    pub enforce_admins: bool,
    pub restrict_creations: bool,
    pub restrict_pushes: bool,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
}

/// Actions permissions as reported by `GET /repos/{owner}/{repo}/actions/permissions`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActionsPermissionsState {
    pub enabled: bool,
    pub allowed_actions: Option<String>,
}

/// Selected-actions policy detail.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SelectedActionsState {
    #[serde(default)]
    pub github_owned_allowed: bool,
    #[serde(default)]
    pub verified_allowed: bool,
    #[serde(default)]
    pub patterns_allowed: Vec<String>,
}

/// Default workflow token permissions.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WorkflowPermissionsState {
    pub default_workflow_permissions: String,
    #[serde(default)]
    pub can_approve_pull_request_reviews: bool,
}

/// GitHub Pages state.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PagesState {
    pub build_type: Option<String>,
    pub source: Option<PagesSourceState>,
}

/// Publishing source of a Pages site.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PagesSourceState {
    pub branch: String,
    pub path: Option<String>,
}

/// One Actions variable with its current value.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VariableState {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Mutation payloads
// ---------------------------------------------------------------------------

/// Body for `PATCH /repos/{owner}/{repo}`; only set fields are sent.
#[derive(Serialize, Default, Debug, Clone)]
pub struct RepoUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,
}

/// Body for label create and update calls.
#[derive(Serialize, Debug, Clone)]
pub struct LabelPayload {
    pub name: String,
    pub color: String,
    pub description: String,
}

/// Review requirement section of a protection payload.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ReviewRequirementPayload {
    pub required_approving_review_count: u32,
    pub dismiss_stale_reviews: bool,
    pub require_code_owner_reviews: bool,
}

/// Status check section of a protection payload.
#[derive(Serialize, Debug, Clone, Default)]
pub struct StatusCheckPayload {
    pub strict: bool,
    pub contexts: Vec<String>,
}

/// Body for `PUT /repos/{owner}/{repo}/branches/{branch}/protection`.
///
/// The first four fields are required by the API and must serialize as
/// explicit nulls when switched off; signed-commit enforcement uses its own
/// endpoint and is not part of this body.
#[derive(Serialize, Debug, Clone, Default)]
pub struct BranchProtectionPayload {
    pub required_status_checks: Option<StatusCheckPayload>,
    pub enforce_admins: Option<bool>,
    pub required_pull_request_reviews: Option<ReviewRequirementPayload>,
    // Push restriction lists (users/teams) are not managed by this tool.
    pub restrictions: Option<()>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_linear_history: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_force_pushes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deletions: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_creations: Option<bool>,
}

/// Body for `PUT /repos/{owner}/{repo}/actions/permissions`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ActionsPermissionsPayload {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_actions: Option<String>,
}

/// Body for `PUT /repos/{owner}/{repo}/actions/permissions/selected-actions`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct SelectedActionsPayload {
    pub github_owned_allowed: bool,
    pub verified_allowed: bool,
    pub patterns_allowed: Vec<String>,
}

/// Body for `PUT /repos/{owner}/{repo}/actions/permissions/workflow`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkflowPermissionsPayload {
    pub default_workflow_permissions: String,
    pub can_approve_pull_request_reviews: bool,
}

/// Body for Pages create and update calls.
#[derive(Serialize, Debug, Clone, Default)]
pub struct PagesUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PagesSourcePayload>,
}

/// Publishing source section of a Pages payload.
#[derive(Serialize, Debug, Clone)]
pub struct PagesSourcePayload {
    pub branch: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Body for `POST`/`PATCH` of an Actions variable.
#[derive(Serialize, Debug, Clone)]
pub struct VariablePayload {
    pub name: String,
    pub value: String,
}
