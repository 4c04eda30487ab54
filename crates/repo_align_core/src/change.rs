//! The Change record and its closed taxonomies.
//!
//! `ChangeKind` and `Category` are fixed, exhaustively matched enums; their
//! serialized forms (`add|update|delete|missing`, snake_case category names)
//! are a wire contract consumed by automation parsing plan output and must
//! stay stable.

use serde::Serialize;

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;

/// The kind of difference a comparator detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// The desired entry does not exist remotely and will be created.
    Add,
    /// The remote value differs from the desired value.
    Update,
    /// The remote entry is not desired and will be removed.
    Delete,
    /// A required value could not be resolved locally; an operator action
    /// is needed, this is not a plannable change.
    Missing,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Add => write!(f, "add"),
            ChangeKind::Update => write!(f, "update"),
            ChangeKind::Delete => write!(f, "delete"),
            ChangeKind::Missing => write!(f, "missing"),
        }
    }
}

/// The settings category a change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Repo,
    Topics,
    Labels,
    BranchProtection,
    Secrets,
    Variables,
    Actions,
    Pages,
}

impl Category {
    /// All categories in plan invocation and display order. The order is
    /// fixed for deterministic output; it carries no other meaning.
    pub const ALL: [Category; 8] = [
        Category::Repo,
        Category::Topics,
        Category::Labels,
        Category::BranchProtection,
        Category::Secrets,
        Category::Variables,
        Category::Actions,
        Category::Pages,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Repo => write!(f, "repo"),
            Category::Topics => write!(f, "topics"),
            Category::Labels => write!(f, "labels"),
            Category::BranchProtection => write!(f, "branch_protection"),
            Category::Secrets => write!(f, "secrets"),
            Category::Variables => write!(f, "variables"),
            Category::Actions => write!(f, "actions"),
            Category::Pages => write!(f, "pages"),
        }
    }
}

/// One detected difference between desired and live state.
///
/// `key` is a stable, human-readable path: a bare field name for scalar
/// settings, `"<branch>.<field>"` for branch protection fields, or the
/// label/secret/variable name. Secret changes never carry values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub category: Category,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
}

impl Change {
    pub fn add(category: Category, key: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Add,
            category,
            key: key.into(),
            old: None,
            new: Some(new.into()),
        }
    }

    pub fn update(
        category: Category,
        key: impl Into<String>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Update,
            category,
            key: key.into(),
            old: Some(old.into()),
            new: Some(new.into()),
        }
    }

    pub fn delete(category: Category, key: impl Into<String>, old: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Delete,
            category,
            key: key.into(),
            old: Some(old.into()),
            new: None,
        }
    }

    pub fn missing(category: Category, key: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Missing,
            category,
            key: key.into(),
            old: None,
            new: None,
        }
    }
}
