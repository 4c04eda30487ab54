//! Remote state gateway for the GitHub REST API.
//!
//! This crate owns everything that touches the live repository: the
//! [`RepoStateGateway`] trait consumed by the reconciliation core, the
//! octocrab-backed [`GitHubGateway`] implementation, the flattened live-state
//! models and the mutation payloads used on apply. The reconciliation core
//! only ever sees the trait, so tests substitute in-memory gateways.

use async_trait::async_trait;

pub mod client;
pub mod errors;
pub mod models;

pub use client::GitHubGateway;
pub use errors::{Error, GatewayResult};
pub use models::{
    ActionsPermissionsPayload, ActionsPermissionsState, BranchProtectionPayload,
    BranchProtectionState, LabelPayload, LabelState, PagesSourcePayload, PagesSourceState,
    PagesState, PagesUpdatePayload, RepoState, RepoUpdatePayload, ReviewRequirementPayload,
    ReviewRequirementState, SelectedActionsPayload, SelectedActionsState, StatusCheckPayload,
    StatusCheckState, VariablePayload, VariableState, WorkflowPermissionsPayload,
    WorkflowPermissionsState,
};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Per-category access to the live repository state.
///
/// Getters return the current remote value for one settings category;
/// mutators push the desired state back on apply. All calls are sequential
/// and fail fast: no method retries, and any error aborts the run.
///
/// [`Error::NotConfigured`] from [`get_branch_protection`] or [`get_pages`]
/// means the sub-resource does not exist yet; callers recover it into an
/// `Add` change instead of propagating the error.
///
/// [`get_branch_protection`]: RepoStateGateway::get_branch_protection
/// [`get_pages`]: RepoStateGateway::get_pages
#[async_trait]
pub trait RepoStateGateway: Send + Sync {
    async fn get_repository(&self) -> GatewayResult<RepoState>;
    async fn get_topics(&self) -> GatewayResult<Vec<String>>;
    async fn get_labels(&self) -> GatewayResult<Vec<LabelState>>;
    async fn get_branch_protection(&self, branch: &str) -> GatewayResult<BranchProtectionState>;
    async fn list_secret_names(&self) -> GatewayResult<Vec<String>>;
    async fn list_variables(&self) -> GatewayResult<Vec<VariableState>>;
    async fn get_actions_permissions(&self) -> GatewayResult<ActionsPermissionsState>;
    async fn get_selected_actions(&self) -> GatewayResult<SelectedActionsState>;
    async fn get_workflow_permissions(&self) -> GatewayResult<WorkflowPermissionsState>;
    async fn get_pages(&self) -> GatewayResult<PagesState>;

    async fn update_repository(&self, payload: &RepoUpdatePayload) -> GatewayResult<()>;
    async fn replace_topics(&self, topics: &[String]) -> GatewayResult<()>;
    async fn create_label(&self, label: &LabelPayload) -> GatewayResult<()>;
    async fn update_label(&self, name: &str, label: &LabelPayload) -> GatewayResult<()>;
    async fn delete_label(&self, name: &str) -> GatewayResult<()>;
    async fn put_branch_protection(
        &self,
        branch: &str,
        payload: &BranchProtectionPayload,
    ) -> GatewayResult<()>;
    async fn set_required_signatures(&self, branch: &str, required: bool) -> GatewayResult<()>;
    async fn delete_secret(&self, name: &str) -> GatewayResult<()>;
    async fn create_variable(&self, variable: &VariablePayload) -> GatewayResult<()>;
    async fn update_variable(&self, variable: &VariablePayload) -> GatewayResult<()>;
    async fn delete_variable(&self, name: &str) -> GatewayResult<()>;
    async fn set_actions_permissions(
        &self,
        payload: &ActionsPermissionsPayload,
    ) -> GatewayResult<()>;
    async fn set_selected_actions(&self, payload: &SelectedActionsPayload) -> GatewayResult<()>;
    async fn set_workflow_permissions(
        &self,
        payload: &WorkflowPermissionsPayload,
    ) -> GatewayResult<()>;
    async fn update_pages(&self, payload: &PagesUpdatePayload) -> GatewayResult<()>;
}
