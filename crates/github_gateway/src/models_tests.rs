//! Tests for the models module.

use super::*;
use serde_json::from_str;

#[test]
fn test_repo_state_deserialization() {
    let json_str = r#"{
        "name": "example",
        "description": "A repository",
        "homepage": null,
        "visibility": "private",
        "allow_squash_merge": true,
        "allow_merge_commit": false,
        "delete_branch_on_merge": true
    }"#;

    let state: RepoState = from_str(json_str).expect("Failed to deserialize RepoState");

    assert_eq!(state.description.as_deref(), Some("A repository"));
    assert_eq!(state.homepage, None);
    assert_eq!(state.visibility.as_deref(), Some("private"));
    assert_eq!(state.allow_squash_merge, Some(true));
    assert_eq!(state.allow_merge_commit, Some(false));
    assert_eq!(state.allow_rebase_merge, None);
}

#[test]
fn test_label_state_description_normalized() {
    let label: LabelState = from_str(r#"{"name": "bug", "color": "d73a4a", "description": null}"#)
        .expect("Failed to deserialize LabelState");

    assert_eq!(label.description_normalized(), "");
}

#[test]
fn test_repo_update_payload_skips_unset_fields() {
    let payload = RepoUpdatePayload {
        description: Some("new".to_string()),
        ..Default::default()
    };

    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body, serde_json::json!({"description": "new"}));
}

#[test]
fn test_branch_protection_payload_serializes_explicit_nulls() {
    let payload = BranchProtectionPayload {
        enforce_admins: Some(true),
        ..Default::default()
    };

    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body["enforce_admins"], serde_json::json!(true));
    assert!(
        body["required_status_checks"].is_null(),
        "absent required sections must serialize as explicit nulls"
    );
    assert!(body["required_pull_request_reviews"].is_null());
    assert!(body["restrictions"].is_null());
    assert!(
        body.get("required_linear_history").is_none(),
        "unset optional fields should be omitted"
    );
}

#[test]
fn test_variable_list_defaults() {
    let state: SelectedActionsState = from_str("{}").unwrap();
    assert!(!state.github_owned_allowed);
    assert!(state.patterns_allowed.is_empty());
}
