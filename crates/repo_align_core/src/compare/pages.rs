//! Pages comparator.
//!
//! A repository without a Pages site yields one Add for the whole section.
//! For an existing site the build type compares when set, and the source
//! branch and path compare independently, but only when both sides carry a
//! source record.

use config_model::PagesSettings;
use github_gateway::RepoStateGateway;

use super::gateway_error;
use crate::change::{Category, Change};
use crate::errors::AlignResult;

const CATEGORY: Category = Category::Pages;

pub(crate) async fn compare(
    desired: &PagesSettings,
    gateway: &dyn RepoStateGateway,
) -> AlignResult<Vec<Change>> {
    let current = match gateway.get_pages().await {
        Ok(state) => state,
        Err(github_gateway::Error::NotConfigured) => {
            let summary = desired
                .build_type
                .map(|build_type| build_type.to_string())
                .unwrap_or_else(|| "enabled".to_string());
            return Ok(vec![Change::add(CATEGORY, "pages", summary)]);
        }
        Err(err) => return Err(gateway_error(CATEGORY)(err)),
    };

    let mut changes = Vec::new();
    if let Some(build_type) = desired.build_type {
        let current_build_type = current.build_type.as_deref().unwrap_or("");
        let desired_build_type = build_type.to_string();
        if desired_build_type != current_build_type {
            changes.push(Change::update(
                CATEGORY,
                "build_type",
                current_build_type,
                desired_build_type,
            ));
        }
    }

    if let (Some(source), Some(current_source)) = (&desired.source, &current.source) {
        if source.branch != current_source.branch {
            changes.push(Change::update(
                CATEGORY,
                "source.branch",
                current_source.branch.clone(),
                source.branch.clone(),
            ));
        }
        if let Some(path) = &source.path {
            let current_path = current_source.path.as_deref().unwrap_or("/");
            if path != current_path {
                changes.push(Change::update(
                    CATEGORY,
                    "source.path",
                    current_path,
                    path.clone(),
                ));
            }
        }
    }

    Ok(changes)
}
