//! Plan calculation.
//!
//! [`PlanCalculator`] orchestrates the category comparators in a fixed
//! order (repo, topics, labels, branch protection, secrets, variables,
//! actions, pages), which determines plan display and JSON ordering. Each
//! comparator only runs when its section is present in the configuration;
//! the secrets and variables comparators are additionally gated behind
//! explicit options. The first error aborts the whole calculation.

use config_model::RepoConfig;
use github_gateway::RepoStateGateway;
use tracing::debug;

use crate::compare;
use crate::errors::AlignResult;
use crate::plan::Plan;
use crate::values::ValueSource;

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;

/// Options gating the secrets and variables comparators.
///
/// Everything else always runs when its section is present. `sync_delete`
/// is off by default so remote entries absent from configuration are never
/// flagged for deletion by surprise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Evaluate required secrets.
    pub check_secrets: bool,
    /// Evaluate variables from the `env` section.
    pub check_env: bool,
    /// Flag remote secrets/variables absent from configuration for
    /// deletion.
    pub sync_delete: bool,
}

/// Calculates reconciliation plans for one repository.
pub struct PlanCalculator<'a> {
    gateway: &'a dyn RepoStateGateway,
    values: &'a dyn ValueSource,
}

impl<'a> PlanCalculator<'a> {
    pub fn new(gateway: &'a dyn RepoStateGateway, values: &'a dyn ValueSource) -> Self {
        Self { gateway, values }
    }

    /// Calculates a plan with default options.
    pub async fn calculate(&self, config: &RepoConfig) -> AlignResult<Plan> {
        self.calculate_with_options(config, &PlanOptions::default())
            .await
    }

    /// Calculates a plan for `config` against the live repository state.
    ///
    /// Validation runs first; a validation failure aborts before any
    /// comparator performs a fetch.
    ///
    /// # Errors
    ///
    /// Returns the first configuration, validation or gateway error. No
    /// partial plan is ever returned.
    pub async fn calculate_with_options(
        &self,
        config: &RepoConfig,
        options: &PlanOptions,
    ) -> AlignResult<Plan> {
        config_model::validate(config)?;

        let mut plan = Plan::new();

        if let Some(repo) = &config.repo {
            debug!("comparing repository settings");
            plan.extend(compare::repo::compare(repo, self.gateway).await?);
        }
        if let Some(topics) = &config.topics {
            debug!("comparing topics");
            plan.extend(compare::topics::compare(topics, self.gateway).await?);
        }
        if let Some(labels) = &config.labels {
            debug!("comparing labels");
            plan.extend(compare::labels::compare(labels, self.gateway).await?);
        }
        if let Some(rules) = &config.branch_protection {
            debug!(branches = rules.len(), "comparing branch protection");
            plan.extend(compare::branch_protection::compare(rules, self.gateway).await?);
        }

        if options.check_secrets {
            let names = desired_secret_names(config);
            if !names.is_empty() {
                debug!(secrets = names.len(), "comparing secrets");
                plan.extend(
                    compare::secrets::compare(
                        &names,
                        self.gateway,
                        self.values,
                        options.sync_delete,
                    )
                    .await?,
                );
            }
        }
        if options.check_env {
            if let Some(variables) = config.env.as_ref().and_then(|env| env.variables.as_ref()) {
                debug!(variables = variables.len(), "comparing variables");
                plan.extend(
                    compare::variables::compare(
                        variables,
                        self.gateway,
                        self.values,
                        options.sync_delete,
                    )
                    .await?,
                );
            }
        }

        if let Some(actions) = &config.actions {
            debug!("comparing actions permissions");
            plan.extend(compare::actions::compare(actions, self.gateway).await?);
        }
        if let Some(pages) = &config.pages {
            debug!("comparing pages");
            plan.extend(compare::pages::compare(pages, self.gateway).await?);
        }

        Ok(plan)
    }
}

/// Secret names from the top-level list and the `env` section, first
/// occurrence wins.
pub(crate) fn desired_secret_names(config: &RepoConfig) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut push = |name: &String| {
        if !names.contains(name) {
            names.push(name.clone());
        }
    };
    if let Some(secrets) = &config.secrets {
        secrets.iter().for_each(&mut push);
    }
    if let Some(env) = &config.env {
        env.secret_names().iter().for_each(&mut push);
    }
    names
}
