//! Deep-merge semantics for configuration documents.
//!
//! The extends resolver folds a chain of documents into one effective
//! document by merging later documents over earlier ones. Precedence is
//! field by field, never section by section: a section present in both
//! documents keeps every field that only the earlier one set.
//!
//! Merge rules per field shape:
//!
//! - scalar `Option` fields: a set overlay value replaces the base value
//! - list fields: a non-empty overlay list replaces the base list wholesale
//! - map fields (branch rules, env variables): merged per key, with the
//!   values of shared keys merged field by field
//! - sub-records (`selected_actions`): merged field by field
//! - the pages `source` record: replaced wholesale, so a branch and its
//!   path always come from the same document

use std::collections::BTreeMap;

use crate::document::{
    ActionsSettings, BranchRule, EnvSettings, LabelSettings, PagesSettings, RepoConfig,
    RepoSettings, SelectedActions,
};

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

fn overlay_scalar<T: Clone>(base: &mut Option<T>, overlay: &Option<T>) {
    if let Some(value) = overlay {
        *base = Some(value.clone());
    }
}

fn overlay_list<T: Clone>(base: &mut Option<Vec<T>>, overlay: &Option<Vec<T>>) {
    if let Some(list) = overlay {
        // An explicitly present empty list still marks the section as
        // managed, but only a non-empty list overrides existing entries.
        if base.is_none() || !list.is_empty() {
            *base = Some(list.clone());
        }
    }
}

impl RepoConfig {
    /// Merges `overlay` into `self`, with `overlay` taking precedence.
    ///
    /// `extends` is deliberately not merged; the resolver clears it on the
    /// effective document.
    pub fn merge_from(&mut self, overlay: &RepoConfig) {
        merge_section(&mut self.repo, &overlay.repo, RepoSettings::merge_from);
        overlay_list(&mut self.topics, &overlay.topics);
        merge_section(&mut self.labels, &overlay.labels, LabelSettings::merge_from);
        merge_rule_map(&mut self.branch_protection, &overlay.branch_protection);
        overlay_list(&mut self.secrets, &overlay.secrets);
        merge_section(&mut self.env, &overlay.env, EnvSettings::merge_from);
        merge_section(
            &mut self.actions,
            &overlay.actions,
            ActionsSettings::merge_from,
        );
        merge_section(&mut self.pages, &overlay.pages, PagesSettings::merge_from);
    }
}

fn merge_section<T: Clone>(base: &mut Option<T>, overlay: &Option<T>, merge: fn(&mut T, &T)) {
    match (base.as_mut(), overlay) {
        (Some(dst), Some(src)) => merge(dst, src),
        (None, Some(src)) => *base = Some(src.clone()),
        _ => {}
    }
}

fn merge_rule_map(
    base: &mut Option<BTreeMap<String, BranchRule>>,
    overlay: &Option<BTreeMap<String, BranchRule>>,
) {
    let Some(src) = overlay else {
        return;
    };
    let dst = base.get_or_insert_with(BTreeMap::new);
    for (branch, rule) in src {
        match dst.get_mut(branch) {
            Some(existing) => existing.merge_from(rule),
            None => {
                dst.insert(branch.clone(), rule.clone());
            }
        }
    }
}

impl RepoSettings {
    fn merge_from(&mut self, overlay: &RepoSettings) {
        overlay_scalar(&mut self.description, &overlay.description);
        overlay_scalar(&mut self.homepage, &overlay.homepage);
        overlay_scalar(&mut self.visibility, &overlay.visibility);
        overlay_scalar(&mut self.allow_squash_merge, &overlay.allow_squash_merge);
        overlay_scalar(&mut self.allow_merge_commit, &overlay.allow_merge_commit);
        overlay_scalar(&mut self.allow_rebase_merge, &overlay.allow_rebase_merge);
        overlay_scalar(&mut self.allow_auto_merge, &overlay.allow_auto_merge);
        overlay_scalar(
            &mut self.delete_branch_on_merge,
            &overlay.delete_branch_on_merge,
        );
    }
}

impl LabelSettings {
    fn merge_from(&mut self, overlay: &LabelSettings) {
        overlay_scalar(&mut self.replace_default, &overlay.replace_default);
        if !overlay.items.is_empty() {
            self.items = overlay.items.clone();
        }
    }
}

impl BranchRule {
    /// Merges `overlay` into `self` field by field, so two documents can
    /// each contribute settings to the same branch.
    pub fn merge_from(&mut self, overlay: &BranchRule) {
        overlay_scalar(&mut self.required_reviews, &overlay.required_reviews);
        overlay_scalar(
            &mut self.dismiss_stale_reviews,
            &overlay.dismiss_stale_reviews,
        );
        overlay_scalar(
            &mut self.require_code_owner_reviews,
            &overlay.require_code_owner_reviews,
        );
        overlay_scalar(
            &mut self.require_status_checks,
            &overlay.require_status_checks,
        );
        overlay_list(&mut self.status_checks, &overlay.status_checks);
        overlay_scalar(
            &mut self.strict_status_checks,
            &overlay.strict_status_checks,
        );
        overlay_list(
            &mut self.required_deployment_environments,
            &overlay.required_deployment_environments,
        );
        overlay_scalar(
            &mut self.require_signed_commits,
            &overlay.require_signed_commits,
        );
        overlay_scalar(
            &mut self.require_linear_history,
            &overlay.require_linear_history,
        );
        overlay_scalar(&mut self.enforce_admins, &overlay.enforce_admins);
        overlay_scalar(&mut self.restrict_creations, &overlay.restrict_creations);
        overlay_scalar(&mut self.restrict_pushes, &overlay.restrict_pushes);
        overlay_scalar(&mut self.allow_force_pushes, &overlay.allow_force_pushes);
        overlay_scalar(&mut self.allow_deletions, &overlay.allow_deletions);
    }
}

impl EnvSettings {
    fn merge_from(&mut self, overlay: &EnvSettings) {
        overlay_list(&mut self.secrets, &overlay.secrets);
        if let Some(src) = &overlay.variables {
            let dst = self.variables.get_or_insert_with(BTreeMap::new);
            for (name, value) in src {
                dst.insert(name.clone(), value.clone());
            }
        }
        overlay_scalar(&mut self.provider, &overlay.provider);
    }
}

impl ActionsSettings {
    fn merge_from(&mut self, overlay: &ActionsSettings) {
        overlay_scalar(&mut self.enabled, &overlay.enabled);
        overlay_scalar(&mut self.allowed_actions, &overlay.allowed_actions);
        merge_section(
            &mut self.selected_actions,
            &overlay.selected_actions,
            SelectedActions::merge_from,
        );
        overlay_scalar(
            &mut self.default_workflow_permissions,
            &overlay.default_workflow_permissions,
        );
        overlay_scalar(
            &mut self.can_approve_pull_request_reviews,
            &overlay.can_approve_pull_request_reviews,
        );
    }
}

impl SelectedActions {
    fn merge_from(&mut self, overlay: &SelectedActions) {
        overlay_scalar(&mut self.github_owned_allowed, &overlay.github_owned_allowed);
        overlay_scalar(&mut self.verified_allowed, &overlay.verified_allowed);
        overlay_list(&mut self.patterns_allowed, &overlay.patterns_allowed);
    }
}

impl PagesSettings {
    fn merge_from(&mut self, overlay: &PagesSettings) {
        overlay_scalar(&mut self.build_type, &overlay.build_type);
        overlay_scalar(&mut self.source, &overlay.source);
    }
}
