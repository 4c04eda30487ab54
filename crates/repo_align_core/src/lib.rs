//! Reconciliation core for RepoAlign.
//!
//! This crate contains the reconciliation engine: the Change/Plan model,
//! one comparator per settings category, the plan calculator that
//! orchestrates them in fixed order, and the apply driver that pushes a
//! calculated plan back through the gateway. The core accepts no logger and
//! performs no presentation; it returns structured changes and errors, and
//! the CLI crate decides how to render them.

pub mod apply;
pub mod calculator;
pub mod change;
pub mod compare;
pub mod errors;
pub mod plan;
pub mod values;

// Re-export for convenient access
pub use apply::{apply_plan, ApplyReport};
pub use calculator::{PlanCalculator, PlanOptions};
pub use change::{Category, Change, ChangeKind};
pub use errors::{AlignError, AlignResult};
pub use plan::{CategoryChanges, Plan, PlanReport, Summary};
pub use values::{ChainedValues, StaticValues, ValueSource, ValueSourceError};
