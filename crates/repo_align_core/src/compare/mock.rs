//! In-memory gateway used by comparator, calculator and apply tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use github_gateway::{
    ActionsPermissionsPayload, ActionsPermissionsState, BranchProtectionPayload,
    BranchProtectionState, Error, GatewayResult, LabelPayload, LabelState, PagesState,
    PagesUpdatePayload, RepoState, RepoStateGateway, RepoUpdatePayload, SelectedActionsPayload,
    SelectedActionsState, VariablePayload, VariableState, WorkflowPermissionsPayload,
    WorkflowPermissionsState,
};

/// Gateway stub with preloaded state and a recorded mutation log.
#[derive(Default)]
pub(crate) struct MockGateway {
    pub repo: RepoState,
    pub topics: Vec<String>,
    pub labels: Vec<LabelState>,
    /// Branches without an entry report `NotConfigured`.
    pub protection: HashMap<String, BranchProtectionState>,
    pub secret_names: Vec<String>,
    pub variables: Vec<VariableState>,
    pub actions: ActionsPermissionsState,
    pub selected_actions: SelectedActionsState,
    pub workflow: WorkflowPermissionsState,
    /// `None` reports `NotConfigured`.
    pub pages: Option<PagesState>,
    pub calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub(crate) fn label(name: &str, color: &str, description: Option<&str>) -> LabelState {
        LabelState {
            name: name.to_string(),
            color: color.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub(crate) fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl RepoStateGateway for MockGateway {
    async fn get_repository(&self) -> GatewayResult<RepoState> {
        Ok(self.repo.clone())
    }

    async fn get_topics(&self) -> GatewayResult<Vec<String>> {
        Ok(self.topics.clone())
    }

    async fn get_labels(&self) -> GatewayResult<Vec<LabelState>> {
        Ok(self.labels.clone())
    }

    async fn get_branch_protection(&self, branch: &str) -> GatewayResult<BranchProtectionState> {
        self.protection
            .get(branch)
            .cloned()
            .ok_or(Error::NotConfigured)
    }

    async fn list_secret_names(&self) -> GatewayResult<Vec<String>> {
        Ok(self.secret_names.clone())
    }

    async fn list_variables(&self) -> GatewayResult<Vec<VariableState>> {
        Ok(self.variables.clone())
    }

    async fn get_actions_permissions(&self) -> GatewayResult<ActionsPermissionsState> {
        Ok(self.actions.clone())
    }

    async fn get_selected_actions(&self) -> GatewayResult<SelectedActionsState> {
        Ok(self.selected_actions.clone())
    }

    async fn get_workflow_permissions(&self) -> GatewayResult<WorkflowPermissionsState> {
        Ok(self.workflow.clone())
    }

    async fn get_pages(&self) -> GatewayResult<PagesState> {
        self.pages.clone().ok_or(Error::NotConfigured)
    }

    async fn update_repository(&self, _payload: &RepoUpdatePayload) -> GatewayResult<()> {
        self.record("update_repository");
        Ok(())
    }

    async fn replace_topics(&self, topics: &[String]) -> GatewayResult<()> {
        self.record(format!("replace_topics:{}", topics.join(",")));
        Ok(())
    }

    async fn create_label(&self, label: &LabelPayload) -> GatewayResult<()> {
        self.record(format!("create_label:{}", label.name));
        Ok(())
    }

    async fn update_label(&self, name: &str, _label: &LabelPayload) -> GatewayResult<()> {
        self.record(format!("update_label:{name}"));
        Ok(())
    }

    async fn delete_label(&self, name: &str) -> GatewayResult<()> {
        self.record(format!("delete_label:{name}"));
        Ok(())
    }

    async fn put_branch_protection(
        &self,
        branch: &str,
        _payload: &BranchProtectionPayload,
    ) -> GatewayResult<()> {
        self.record(format!("put_branch_protection:{branch}"));
        Ok(())
    }

    async fn set_required_signatures(&self, branch: &str, required: bool) -> GatewayResult<()> {
        self.record(format!("set_required_signatures:{branch}:{required}"));
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> GatewayResult<()> {
        self.record(format!("delete_secret:{name}"));
        Ok(())
    }

    async fn create_variable(&self, variable: &VariablePayload) -> GatewayResult<()> {
        self.record(format!("create_variable:{}", variable.name));
        Ok(())
    }

    async fn update_variable(&self, variable: &VariablePayload) -> GatewayResult<()> {
        self.record(format!("update_variable:{}", variable.name));
        Ok(())
    }

    async fn delete_variable(&self, name: &str) -> GatewayResult<()> {
        self.record(format!("delete_variable:{name}"));
        Ok(())
    }

    async fn set_actions_permissions(
        &self,
        _payload: &ActionsPermissionsPayload,
    ) -> GatewayResult<()> {
        self.record("set_actions_permissions");
        Ok(())
    }

    async fn set_selected_actions(&self, _payload: &SelectedActionsPayload) -> GatewayResult<()> {
        self.record("set_selected_actions");
        Ok(())
    }

    async fn set_workflow_permissions(
        &self,
        _payload: &WorkflowPermissionsPayload,
    ) -> GatewayResult<()> {
        self.record("set_workflow_permissions");
        Ok(())
    }

    async fn update_pages(&self, _payload: &PagesUpdatePayload) -> GatewayResult<()> {
        self.record("update_pages");
        Ok(())
    }
}
