//! The Plan aggregate.
//!
//! A Plan is the ordered list of Changes produced by one reconciliation run,
//! populated by successive comparator calls in category order and never
//! mutated after the calculator returns it.

use serde::Serialize;

use crate::change::{Category, Change, ChangeKind};

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;

/// The aggregate result of one reconciliation run.
#[derive(Debug, Default)]
pub struct Plan {
    changes: Vec<Change>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends changes, keeping insertion order.
    pub fn extend(&mut self, changes: Vec<Change>) {
        self.changes.extend(changes);
    }

    /// All changes in category order.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Whether the plan contains any change at all, including Missing
    /// entries.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Whether the plan contains deletions.
    pub fn has_deletes(&self) -> bool {
        self.changes
            .iter()
            .any(|change| change.kind == ChangeKind::Delete)
    }

    /// Whether any required secret has no locally resolvable value.
    pub fn has_missing_secrets(&self) -> bool {
        self.has_missing(Category::Secrets)
    }

    /// Whether any required variable has no locally resolvable value.
    pub fn has_missing_variables(&self) -> bool {
        self.has_missing(Category::Variables)
    }

    fn has_missing(&self, category: Category) -> bool {
        self.changes
            .iter()
            .any(|change| change.kind == ChangeKind::Missing && change.category == category)
    }

    /// Change counts by kind.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for change in &self.changes {
            match change.kind {
                ChangeKind::Add => summary.add += 1,
                ChangeKind::Update => summary.update += 1,
                ChangeKind::Delete => summary.delete += 1,
                ChangeKind::Missing => summary.missing += 1,
            }
        }
        summary
    }

    /// The serializable report: changes grouped by category in fixed
    /// category order, plus the summary counts. This structure and its
    /// field names are the durable wire format of the tool.
    pub fn report(&self) -> PlanReport {
        let categories = Category::ALL
            .iter()
            .filter_map(|&category| {
                let changes: Vec<Change> = self
                    .changes
                    .iter()
                    .filter(|change| change.category == category)
                    .cloned()
                    .collect();
                if changes.is_empty() {
                    None
                } else {
                    Some(CategoryChanges { category, changes })
                }
            })
            .collect();
        PlanReport {
            categories,
            summary: self.summary(),
        }
    }
}

/// Change counts by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub add: usize,
    pub update: usize,
    pub delete: usize,
    pub missing: usize,
}

/// Changes for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryChanges {
    pub category: Category,
    pub changes: Vec<Change>,
}

/// The serializable form of a Plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub categories: Vec<CategoryChanges>,
    pub summary: Summary,
}
