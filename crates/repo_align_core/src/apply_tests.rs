//! Tests for the apply module.

use config_model::RepoConfig;

use super::*;
use crate::calculator::PlanCalculator;
use crate::compare::mock::MockGateway;
use crate::plan::Plan;
use crate::values::StaticValues;

fn config(yaml: &str) -> RepoConfig {
    serde_yaml::from_str(yaml).expect("test config should parse")
}

fn plan_of(changes: Vec<Change>) -> Plan {
    let mut plan = Plan::default();
    plan.extend(changes);
    plan
}

#[tokio::test]
async fn test_empty_plan_applies_nothing() {
    let gateway = MockGateway::default();
    let report = apply_plan(&gateway, &RepoConfig::new(), &Plan::default())
        .await
        .unwrap();

    assert_eq!(report, ApplyReport::default());
    assert!(gateway.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_label_changes_map_to_create_update_delete() {
    let gateway = MockGateway::default();
    let config = config(
        "labels:\n  items:\n    - name: bug\n      color: d73a4a\n    - name: feature\n      color: a2eeef\n",
    );
    let plan = plan_of(vec![
        Change::add(Category::Labels, "bug", "#d73a4a"),
        Change::update(Category::Labels, "feature", "#000000", "#a2eeef"),
        Change::delete(Category::Labels, "legacy", "#cccccc"),
    ]);

    let report = apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(report.applied, 3);
    assert_eq!(
        gateway.recorded_calls(),
        vec!["create_label:bug", "update_label:feature", "delete_label:legacy"]
    );
}

#[tokio::test]
async fn test_topics_replaced_wholesale() {
    let gateway = MockGateway::default();
    let config = config("topics: [rust, cli]\n");
    let plan = plan_of(vec![Change::update(
        Category::Topics,
        "topics",
        "old",
        "cli, rust",
    )]);

    apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(gateway.recorded_calls(), vec!["replace_topics:rust,cli"]);
}

#[tokio::test]
async fn test_secret_adds_are_skipped_deletes_applied() {
    let gateway = MockGateway::default();
    let config = config("secrets: [API_KEY]\n");
    let plan = plan_of(vec![
        Change {
            kind: ChangeKind::Add,
            category: Category::Secrets,
            key: "API_KEY".to_string(),
            old: None,
            new: None,
        },
        Change::missing(Category::Secrets, "DEPLOY_TOKEN"),
        Change {
            kind: ChangeKind::Delete,
            category: Category::Secrets,
            key: "OLD".to_string(),
            old: None,
            new: None,
        },
    ]);

    let report = apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped, 2, "secret value pushes require operator action");
    assert_eq!(gateway.recorded_calls(), vec!["delete_secret:OLD"]);
}

#[tokio::test]
async fn test_variable_changes_use_effective_values() {
    let gateway = MockGateway::default();
    let config = config("env:\n  variables:\n    LOG_LEVEL: info\n    REGION: eu\n");
    let plan = plan_of(vec![
        Change::add(Category::Variables, "LOG_LEVEL", "debug"),
        Change::update(Category::Variables, "REGION", "us", "eu"),
    ]);

    let report = apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(report.applied, 2);
    assert_eq!(
        gateway.recorded_calls(),
        vec!["create_variable:LOG_LEVEL", "update_variable:REGION"]
    );
}

#[tokio::test]
async fn test_branch_protection_put_per_configured_branch() {
    let gateway = MockGateway::default();
    let config = config(
        "branch_protection:\n  main:\n    required_reviews: 2\n    require_signed_commits: true\n",
    );
    let plan = plan_of(vec![Change::add(
        Category::BranchProtection,
        "main",
        "required_reviews=2",
    )]);

    let report = apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(report.applied, 2);
    assert_eq!(
        gateway.recorded_calls(),
        vec!["put_branch_protection:main", "set_required_signatures:main:true"]
    );
}

#[tokio::test]
async fn test_unsupported_protection_fields_count_as_skipped() {
    let gateway = MockGateway::default();
    let config = config(
        "branch_protection:\n  main:\n    enforce_admins: true\n    restrict_pushes: true\n    required_deployment_environments: [staging]\n",
    );
    let plan = plan_of(vec![
        Change::update(
            Category::BranchProtection,
            "main.enforce_admins",
            "false",
            "true",
        ),
        Change::update(
            Category::BranchProtection,
            "main.restrict_pushes",
            "false",
            "true",
        ),
        Change::update(
            Category::BranchProtection,
            "main.required_deployment_environments",
            "",
            "staging",
        ),
    ]);

    let report = apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(
        report.skipped, 2,
        "push restrictions and deployment environments cannot be pushed through this endpoint"
    );
    assert_eq!(gateway.recorded_calls(), vec!["put_branch_protection:main"]);
}

#[tokio::test]
async fn test_apply_pushes_exactly_the_planned_state() {
    let gateway = MockGateway {
        topics: vec!["old".to_string()],
        ..Default::default()
    };
    let config = config(
        "topics: [rust]\nlabels:\n  items:\n    - name: bug\n      color: d73a4a\n",
    );
    let values = StaticValues::new();

    let plan = PlanCalculator::new(&gateway, &values)
        .calculate(&config)
        .await
        .unwrap();
    let report = apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(report.applied, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(
        gateway.recorded_calls(),
        vec!["replace_topics:rust", "create_label:bug"],
        "apply must push the state the plan previewed, nothing else"
    );
}

#[tokio::test]
async fn test_actions_apply_only_touches_configured_endpoints() {
    let gateway = MockGateway::default();
    let config = config("actions:\n  default_workflow_permissions: read\n");
    let plan = plan_of(vec![Change::update(
        Category::Actions,
        "default_workflow_permissions",
        "write",
        "read",
    )]);

    apply_plan(&gateway, &config, &plan).await.unwrap();

    assert_eq!(
        gateway.recorded_calls(),
        vec!["set_workflow_permissions"],
        "no enabled/allowed or selected fields configured, so only the workflow endpoint is written"
    );
}
