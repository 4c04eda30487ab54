//! Tests for the plan module.

use super::*;
use crate::change::{Category, Change};

fn sample_plan() -> Plan {
    let mut plan = Plan::new();
    plan.extend(vec![
        Change::update(Category::Repo, "description", "old", "new"),
        Change::add(Category::Labels, "bug", "#d73a4a"),
        Change::delete(Category::Labels, "legacy", "#cccccc"),
        Change::missing(Category::Secrets, "API_KEY"),
    ]);
    plan
}

#[test]
fn test_empty_plan_has_no_changes() {
    let plan = Plan::new();
    assert!(!plan.has_changes());
    assert!(!plan.has_deletes());
    assert!(!plan.has_missing_secrets());
    assert!(!plan.has_missing_variables());
    assert_eq!(plan.summary(), Summary::default());
}

#[test]
fn test_predicates() {
    let plan = sample_plan();
    assert!(plan.has_changes());
    assert!(plan.has_deletes());
    assert!(plan.has_missing_secrets());
    assert!(
        !plan.has_missing_variables(),
        "missing secret must not count as missing variable"
    );
}

#[test]
fn test_summary_counts_by_kind() {
    let summary = sample_plan().summary();
    assert_eq!(
        summary,
        Summary {
            add: 1,
            update: 1,
            delete: 1,
            missing: 1
        }
    );
}

#[test]
fn test_report_groups_by_category_in_fixed_order() {
    let report = sample_plan().report();

    let categories: Vec<Category> = report
        .categories
        .iter()
        .map(|group| group.category)
        .collect();
    assert_eq!(
        categories,
        vec![Category::Repo, Category::Labels, Category::Secrets],
        "empty categories are omitted and the rest keep display order"
    );
    assert_eq!(report.categories[1].changes.len(), 2);
}

#[test]
fn test_report_wire_format_is_stable() {
    let mut plan = Plan::new();
    plan.extend(vec![Change::add(Category::Labels, "bug", "#d73a4a")]);

    let value = serde_json::to_value(plan.report()).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "categories": [
                {
                    "category": "labels",
                    "changes": [
                        {
                            "type": "add",
                            "category": "labels",
                            "key": "bug",
                            "new": "#d73a4a"
                        }
                    ]
                }
            ],
            "summary": { "add": 1, "update": 0, "delete": 0, "missing": 0 }
        })
    );
}
