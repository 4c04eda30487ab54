//! Configuration model for RepoAlign.
//!
//! This crate owns the desired-state side of reconciliation: the parsed
//! configuration document types, the deep-merge semantics used by the
//! extends resolver, the resolver itself, the document loader and the
//! pre-flight validation rules. It performs no comparison against live
//! state; that lives in `repo_align_core`.

pub mod document;
pub mod errors;
pub mod loader;
pub mod merge;
pub mod resolver;
pub mod validation;

// Re-export for convenient access
pub use document::{
    ActionsSettings, AllowedActions, BranchRule, EnvSettings, LabelConfig, LabelSettings,
    PagesBuildType, PagesSettings, PagesSource, RepoConfig, RepoSettings, SecretProviderConfig,
    SelectedActions, Visibility, WorkflowPermission,
};
pub use errors::{ConfigError, ConfigResult};
pub use loader::{parse_document, DocumentLoader, Loader, FETCH_TIMEOUT};
pub use resolver::{ExtendsResolver, ReferenceBase};
pub use validation::validate;
