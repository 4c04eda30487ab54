//! Category comparators.
//!
//! One module per settings category. Every comparator follows the same
//! shape: fetch the current value(s) through the gateway, compare each
//! *desired* field that is set, and emit changes only where they differ.
//! Desired fields left absent are never compared; a category whose section
//! is absent from the configuration is never invoked at all.

use crate::change::{Category, Change};
use crate::errors::AlignError;

pub(crate) mod actions;
pub(crate) mod branch_protection;
pub(crate) mod labels;
pub(crate) mod pages;
pub(crate) mod repo;
pub(crate) mod secrets;
pub(crate) mod topics;
pub(crate) mod variables;

#[cfg(test)]
pub(crate) mod mock;

/// Wraps a gateway error with the category whose fetch failed.
fn gateway_error(category: Category) -> impl FnOnce(github_gateway::Error) -> AlignError {
    move |source| AlignError::Compare { category, source }
}

/// Emits an Update change when a set desired flag differs from the current
/// value.
fn push_flag(
    changes: &mut Vec<Change>,
    category: Category,
    key: impl Into<String>,
    desired: Option<bool>,
    current: bool,
) {
    if let Some(value) = desired {
        if value != current {
            changes.push(Change::update(
                category,
                key,
                current.to_string(),
                value.to_string(),
            ));
        }
    }
}

/// Joins list values for display in a change record.
fn display_list(items: &[String]) -> String {
    items.join(", ")
}

/// Sorted copy used for order-insensitive list comparison.
fn sorted(items: &[String]) -> Vec<String> {
    let mut copy = items.to_vec();
    copy.sort_unstable();
    copy
}
