//! Desired-state configuration document types.
//!
//! This module defines [`RepoConfig`], the parsed representation of one YAML
//! configuration document, together with the section records it is composed
//! of. Every section and every field inside a section is individually
//! optional: an absent field means "do not manage this setting" and must stay
//! distinguishable from a field explicitly set to its zero value. Nothing in
//! this crate ever substitutes a default for an absent field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

/// Repository visibility options in GitHub.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Repository is publicly accessible to anyone.
    Public,
    /// Repository is only accessible to members and collaborators.
    Private,
    /// Repository is accessible to organization members (Enterprise feature).
    Internal,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Internal => write!(f, "internal"),
        }
    }
}

/// Which actions and reusable workflows are allowed to run.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AllowedActions {
    /// Any action or reusable workflow can be used.
    All,
    /// Only actions defined in repositories within the organization.
    LocalOnly,
    /// Only the actions matched by the selected-actions policy.
    Selected,
}

impl std::fmt::Display for AllowedActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllowedActions::All => write!(f, "all"),
            AllowedActions::LocalOnly => write!(f, "local_only"),
            AllowedActions::Selected => write!(f, "selected"),
        }
    }
}

/// Default permission granted to the workflow token.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPermission {
    /// Read-only access to repository contents and packages.
    Read,
    /// Read and write access to repository contents and packages.
    Write,
}

impl std::fmt::Display for WorkflowPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowPermission::Read => write!(f, "read"),
            WorkflowPermission::Write => write!(f, "write"),
        }
    }
}

/// How GitHub Pages builds the site.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PagesBuildType {
    /// Classic branch-based build.
    Legacy,
    /// Build and deploy through a GitHub Actions workflow.
    Workflow,
}

impl std::fmt::Display for PagesBuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagesBuildType::Legacy => write!(f, "legacy"),
            PagesBuildType::Workflow => write!(f, "workflow"),
        }
    }
}

/// One parsed configuration document.
///
/// A document may inherit from other documents through `extends`; the
/// resolver in [`crate::resolver`] flattens the chain into a single
/// effective document with `extends` cleared.
///
/// # Examples
///
/// ```rust
/// use config_model::RepoConfig;
///
/// let config: RepoConfig = serde_yaml::from_str(
///     "topics:\n  - rust\n  - cli\n",
/// ).unwrap();
/// assert_eq!(config.topics.as_deref(), Some(["rust".to_string(), "cli".to_string()].as_slice()));
/// assert!(config.repo.is_none());
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RepoConfig {
    /// Ordered references (local path or URL) this document inherits from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,

    /// Scalar repository settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<RepoSettings>,

    /// Repository topics, compared as a multiset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,

    /// Issue and pull request labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelSettings>,

    /// Branch protection rules keyed by branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_protection: Option<BTreeMap<String, BranchRule>>,

    /// Names of Actions secrets that must exist on the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<String>>,

    /// Actions variables, additional secrets and the secret provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvSettings>,

    /// GitHub Actions permission settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionsSettings>,

    /// GitHub Pages settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<PagesSettings>,
}

impl RepoConfig {
    /// Creates an empty document with every section absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the extends references, or an empty slice when absent.
    pub fn extends_refs(&self) -> &[String] {
        self.extends.as_deref().unwrap_or(&[])
    }
}

/// Scalar repository settings.
///
/// Every field is independently optional so that "unset" stays
/// distinguishable from "set to the default value".
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RepoSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

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

/// Label management settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LabelSettings {
    /// When true, labels on the repository that are not listed in `items`
    /// are deleted. Defaults to false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_default: Option<bool>,

    /// The labels to manage.
    #[serde(default)]
    pub items: Vec<LabelConfig>,
}

impl LabelSettings {
    /// Whether unmanaged labels should be removed from the repository.
    pub fn replace_default(&self) -> bool {
        self.replace_default.unwrap_or(false)
    }
}

/// A single managed label.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    pub name: String,

    /// Six character hex color without the leading `#`.
    pub color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LabelConfig {
    /// The label description with an absent value normalized to the empty
    /// string. GitHub reports missing descriptions as null and comparing
    /// through this accessor keeps both code paths consistent.
    pub fn description_normalized(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Protection rule for one branch.
///
/// All fields are optional; only fields that are set participate in
/// comparison and merging.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BranchRule {
    /// Number of approving reviews required before merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_reviews: Option<u32>,

    /// Dismiss stale pull request approvals when new commits are pushed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,

    /// Require review from code owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,

    /// Require status checks to pass before merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_status_checks: Option<bool>,

    /// Status check contexts that must pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_checks: Option<Vec<String>>,

    /// Require branches to be up to date before merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_status_checks: Option<bool>,

    /// Environments that must be successfully deployed to before merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_deployment_environments: Option<Vec<String>>,

    /// Require signed commits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_signed_commits: Option<bool>,

    /// Require a linear commit history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_linear_history: Option<bool>,

    /// Apply the rule to repository administrators as well.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,

    /// Restrict who can create matching branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict_creations: Option<bool>,

    /// Restrict who can push to matching branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict_pushes: Option<bool>,

    /// Permit force pushes to matching branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_force_pushes: Option<bool>,

    /// Permit deletion of matching branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deletions: Option<bool>,
}

/// Actions variables, additional secret names and the secret provider.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct EnvSettings {
    /// Additional required secret names, merged with the top level
    /// `secrets` list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<String>>,

    /// Actions variables and their default values. A local value store
    /// entry with the same name overrides the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,

    /// Where secret values are fetched from when not present in the local
    /// value store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<SecretProviderConfig>,
}

impl EnvSettings {
    /// Secret names declared in this section, or an empty slice.
    pub fn secret_names(&self) -> &[String] {
        self.secrets.as_deref().unwrap_or(&[])
    }
}

/// Configuration for an external secret provider.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SecretProviderConfig {
    /// Provider identifier, for example `aws-secrets-manager`.
    pub kind: String,

    /// Prefix prepended to secret names when querying the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// GitHub Actions permission settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ActionsSettings {
    /// Whether Actions are enabled for the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Which actions are allowed to run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_actions: Option<AllowedActions>,

    /// Policy detail used when `allowed_actions` is `selected`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_actions: Option<SelectedActions>,

    /// Default permission granted to the workflow token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_workflow_permissions: Option<WorkflowPermission>,

    /// Whether workflows may approve pull request reviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_approve_pull_request_reviews: Option<bool>,
}

/// Selected-actions policy detail.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SelectedActions {
    /// Allow actions created by GitHub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_owned_allowed: Option<bool>,

    /// Allow actions from verified creators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_allowed: Option<bool>,

    /// Action patterns that are allowed to run, compared in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns_allowed: Option<Vec<String>>,
}

/// GitHub Pages settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PagesSettings {
    /// How the site is built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_type: Option<PagesBuildType>,

    /// Branch and directory the legacy build publishes from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PagesSource>,
}

/// Publishing source for a legacy Pages build.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PagesSource {
    pub branch: String,

    /// Directory within the branch, `/` or `/docs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
