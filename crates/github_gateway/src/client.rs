//! Octocrab-backed gateway implementation.

use async_trait::async_trait;
use octocrab::Octocrab;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::{Error, GatewayResult};
use crate::models::{
    ActionsPermissionsPayload, ActionsPermissionsState, BranchProtectionPayload,
    BranchProtectionState, LabelPayload, LabelState, PagesState, PagesUpdatePayload,
    RepoState, RepoUpdatePayload, ReviewRequirementState, SelectedActionsPayload,
    SelectedActionsState, StatusCheckState, VariablePayload, VariableState,
    WorkflowPermissionsPayload, WorkflowPermissionsState,
};
use crate::RepoStateGateway;

const PAGE_SIZE: usize = 100;

/// Characters that cannot appear raw inside one path segment. Label and
/// branch names may contain spaces, slashes and other reserved characters
/// ("good first issue" is in GitHub's default label set).
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Gateway over the GitHub REST API for one repository.
pub struct GitHubGateway {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubGateway {
    /// Creates a gateway around an already configured octocrab client.
    pub fn new(client: Octocrab, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Creates a gateway authenticated with a personal access token.
    pub fn from_token(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> GatewayResult<Self> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|err| Error::Request(err.to_string()))?;
        Ok(Self::new(client, owner, repo))
    }

    fn route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{}", self.owner, self.repo, suffix)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        suffix: &str,
        optional_resource: bool,
    ) -> GatewayResult<T> {
        debug!(route = suffix, "fetching live state");
        self.client
            .get(self.route(suffix), None::<&()>)
            .await
            .map_err(|err| Error::from_octocrab(err, optional_resource))
    }

    async fn put_raw<B: serde::Serialize>(&self, suffix: &str, body: &B) -> GatewayResult<()> {
        let response = self
            .client
            ._put(self.route(suffix), Some(body))
            .await
            .map_err(|err| Error::from_octocrab(err, false))?;
        check_status(response.status())
    }

    async fn post_raw<B: serde::Serialize>(&self, suffix: &str, body: &B) -> GatewayResult<()> {
        let response = self
            .client
            ._post(self.route(suffix), Some(body))
            .await
            .map_err(|err| Error::from_octocrab(err, false))?;
        check_status(response.status())
    }

    async fn patch_raw<B: serde::Serialize>(&self, suffix: &str, body: &B) -> GatewayResult<()> {
        let response = self
            .client
            ._patch(self.route(suffix), Some(body))
            .await
            .map_err(|err| Error::from_octocrab(err, false))?;
        check_status(response.status())
    }

    async fn delete_raw(&self, suffix: &str) -> GatewayResult<()> {
        let response = self
            .client
            ._delete(self.route(suffix), None::<&()>)
            .await
            .map_err(|err| Error::from_octocrab(err, false))?;
        check_status(response.status())
    }
}

fn check_status(status: http::StatusCode) -> GatewayResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Api {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TopicsWire {
    names: Vec<String>,
}

#[derive(Deserialize, Default)]
struct EnabledFlag {
    #[serde(default)]
    enabled: bool,
}

#[derive(Deserialize)]
struct ReviewWire {
    #[serde(default)]
    required_approving_review_count: u32,
    #[serde(default)]
    dismiss_stale_reviews: bool,
    #[serde(default)]
    require_code_owner_reviews: bool,
}

#[derive(Deserialize)]
struct StatusChecksWire {
    #[serde(default)]
    strict: bool,
    #[serde(default)]
    contexts: Vec<String>,
}

#[derive(Deserialize)]
struct ProtectionWire {
    required_pull_request_reviews: Option<ReviewWire>,
    required_status_checks: Option<StatusChecksWire>,
    required_signatures: Option<EnabledFlag>,
    required_linear_history: Option<EnabledFlag>,
    enforce_admins: Option<EnabledFlag>,
    block_creations: Option<EnabledFlag>,
    restrictions: Option<serde_json::Value>,
    allow_force_pushes: Option<EnabledFlag>,
    allow_deletions: Option<EnabledFlag>,
    required_deployment_environments: Option<Vec<String>>,
}

impl From<ProtectionWire> for BranchProtectionState {
    fn from(wire: ProtectionWire) -> Self {
        BranchProtectionState {
            required_pull_request_reviews: wire.required_pull_request_reviews.map(|reviews| {
                ReviewRequirementState {
                    required_approving_review_count: reviews.required_approving_review_count,
                    dismiss_stale_reviews: reviews.dismiss_stale_reviews,
                    require_code_owner_reviews: reviews.require_code_owner_reviews,
                }
            }),
            required_status_checks: wire.required_status_checks.map(|checks| StatusCheckState {
                strict: checks.strict,
                contexts: checks.contexts,
            }),
            required_deployment_environments: wire.required_deployment_environments,
            required_signatures: wire.required_signatures.unwrap_or_default().enabled,
            required_linear_history: wire.required_linear_history.unwrap_or_default().enabled,
            enforce_admins: wire.enforce_admins.unwrap_or_default().enabled,
            restrict_creations: wire.block_creations.unwrap_or_default().enabled,
            restrict_pushes: wire.restrictions.is_some(),
            allow_force_pushes: wire.allow_force_pushes.unwrap_or_default().enabled,
            allow_deletions: wire.allow_deletions.unwrap_or_default().enabled,
        }
    }
}

#[derive(Deserialize)]
struct SecretWire {
    name: String,
}

#[derive(Deserialize)]
struct SecretListWire {
    #[serde(default)]
    secrets: Vec<SecretWire>,
}

#[derive(Deserialize)]
struct VariableListWire {
    #[serde(default)]
    variables: Vec<VariableState>,
}

#[derive(serde::Serialize)]
struct TopicsPayload<'a> {
    names: &'a [String],
}

#[async_trait]
impl RepoStateGateway for GitHubGateway {
    #[instrument(skip(self))]
    async fn get_repository(&self) -> GatewayResult<RepoState> {
        self.get_json("", false).await
    }

    async fn get_topics(&self) -> GatewayResult<Vec<String>> {
        let wire: TopicsWire = self.get_json("/topics", false).await?;
        Ok(wire.names)
    }

    async fn get_labels(&self) -> GatewayResult<Vec<LabelState>> {
        let mut labels = Vec::new();
        let mut page = 1usize;
        loop {
            let batch: Vec<LabelState> = self
                .get_json(&format!("/labels?per_page={PAGE_SIZE}&page={page}"), false)
                .await?;
            let last_page = batch.len() < PAGE_SIZE;
            labels.extend(batch);
            if last_page {
                return Ok(labels);
            }
            page += 1;
        }
    }

    async fn get_branch_protection(&self, branch: &str) -> GatewayResult<BranchProtectionState> {
        let wire: ProtectionWire = self
            .get_json(&format!("/branches/{}/protection", encode_segment(branch)), true)
            .await?;
        Ok(wire.into())
    }

    async fn list_secret_names(&self) -> GatewayResult<Vec<String>> {
        let wire: SecretListWire = self.get_json("/actions/secrets", false).await?;
        Ok(wire.secrets.into_iter().map(|secret| secret.name).collect())
    }

    async fn list_variables(&self) -> GatewayResult<Vec<VariableState>> {
        let wire: VariableListWire = self.get_json("/actions/variables", false).await?;
        Ok(wire.variables)
    }

    async fn get_actions_permissions(&self) -> GatewayResult<ActionsPermissionsState> {
        self.get_json("/actions/permissions", false).await
    }

    async fn get_selected_actions(&self) -> GatewayResult<SelectedActionsState> {
        self.get_json("/actions/permissions/selected-actions", false)
            .await
    }

    async fn get_workflow_permissions(&self) -> GatewayResult<WorkflowPermissionsState> {
        self.get_json("/actions/permissions/workflow", false).await
    }

    async fn get_pages(&self) -> GatewayResult<PagesState> {
        self.get_json("/pages", true).await
    }

    async fn update_repository(&self, payload: &RepoUpdatePayload) -> GatewayResult<()> {
        let _: serde_json::Value = self
            .client
            .patch(self.route(""), Some(payload))
            .await
            .map_err(|err| Error::from_octocrab(err, false))?;
        Ok(())
    }

    async fn replace_topics(&self, topics: &[String]) -> GatewayResult<()> {
        let _: serde_json::Value = self
            .client
            .put(self.route("/topics"), Some(&TopicsPayload { names: topics }))
            .await
            .map_err(|err| Error::from_octocrab(err, false))?;
        Ok(())
    }

    async fn create_label(&self, label: &LabelPayload) -> GatewayResult<()> {
        self.post_raw("/labels", label).await
    }

    async fn update_label(&self, name: &str, label: &LabelPayload) -> GatewayResult<()> {
        self.patch_raw(&format!("/labels/{}", encode_segment(name)), label)
            .await
    }

    async fn delete_label(&self, name: &str) -> GatewayResult<()> {
        self.delete_raw(&format!("/labels/{}", encode_segment(name)))
            .await
    }

    async fn put_branch_protection(
        &self,
        branch: &str,
        payload: &BranchProtectionPayload,
    ) -> GatewayResult<()> {
        self.put_raw(
            &format!("/branches/{}/protection", encode_segment(branch)),
            payload,
        )
        .await
    }

    async fn set_required_signatures(&self, branch: &str, required: bool) -> GatewayResult<()> {
        let suffix = format!(
            "/branches/{}/protection/required_signatures",
            encode_segment(branch)
        );
        if required {
            self.post_raw(&suffix, &serde_json::json!({})).await
        } else {
            match self.delete_raw(&suffix).await {
                // Deleting an absent requirement is already the desired state.
                Err(Error::Api { status: 404, .. }) => Ok(()),
                other => other,
            }
        }
    }

    async fn delete_secret(&self, name: &str) -> GatewayResult<()> {
        self.delete_raw(&format!("/actions/secrets/{name}")).await
    }

    async fn create_variable(&self, variable: &VariablePayload) -> GatewayResult<()> {
        self.post_raw("/actions/variables", variable).await
    }

    async fn update_variable(&self, variable: &VariablePayload) -> GatewayResult<()> {
        self.patch_raw(&format!("/actions/variables/{}", variable.name), variable)
            .await
    }

    async fn delete_variable(&self, name: &str) -> GatewayResult<()> {
        self.delete_raw(&format!("/actions/variables/{name}")).await
    }

    async fn set_actions_permissions(
        &self,
        payload: &ActionsPermissionsPayload,
    ) -> GatewayResult<()> {
        self.put_raw("/actions/permissions", payload).await
    }

    async fn set_selected_actions(&self, payload: &SelectedActionsPayload) -> GatewayResult<()> {
        self.put_raw("/actions/permissions/selected-actions", payload)
            .await
    }

    async fn set_workflow_permissions(
        &self,
        payload: &WorkflowPermissionsPayload,
    ) -> GatewayResult<()> {
        self.put_raw("/actions/permissions/workflow", payload).await
    }

    async fn update_pages(&self, payload: &PagesUpdatePayload) -> GatewayResult<()> {
        match self.put_raw("/pages", payload).await {
            // A site that was never enabled has to be created first.
            Err(Error::Api { status: 404, .. }) => self.post_raw("/pages", payload).await,
            other => other,
        }
    }
}
