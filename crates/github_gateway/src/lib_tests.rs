//! Tests for the gateway against a mock GitHub API.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

async fn gateway_for(mock_server: &MockServer) -> GitHubGateway {
    let octocrab = octocrab::Octocrab::builder()
        .base_uri(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();
    GitHubGateway::new(octocrab, "test-org", "test-repo")
}

#[tokio::test]
async fn test_get_topics_returns_names() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "names": ["rust", "cli"]
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let topics = gateway.get_topics().await.expect("topics fetch should succeed");

    assert_eq!(topics, vec!["rust".to_string(), "cli".to_string()]);
}

#[tokio::test]
async fn test_branch_protection_404_maps_to_not_configured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/branches/main/protection"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Branch not protected",
            "documentation_url": "https://docs.github.com"
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let err = gateway.get_branch_protection("main").await.unwrap_err();

    assert!(
        matches!(err, Error::NotConfigured),
        "expected NotConfigured, got {err:?}"
    );
}

#[tokio::test]
async fn test_branch_protection_flattens_enabled_wrappers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/branches/main/protection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "required_pull_request_reviews": {
                "required_approving_review_count": 2,
                "dismiss_stale_reviews": true,
                "require_code_owner_reviews": false
            },
            "required_status_checks": {
                "strict": true,
                "contexts": ["build"]
            },
            "enforce_admins": { "enabled": true },
            "required_linear_history": { "enabled": false },
            "allow_force_pushes": { "enabled": false },
            "allow_deletions": { "enabled": false }
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let state = gateway.get_branch_protection("main").await.unwrap();

    let reviews = state.required_pull_request_reviews.unwrap();
    assert_eq!(reviews.required_approving_review_count, 2);
    assert!(reviews.dismiss_stale_reviews);
    assert!(state.enforce_admins);
    assert!(!state.required_linear_history);
    assert!(!state.restrict_pushes, "no restrictions object means no push restriction");
    let checks = state.required_status_checks.unwrap();
    assert!(checks.strict);
    assert_eq!(checks.contexts, vec!["build".to_string()]);
}

#[tokio::test]
async fn test_pages_404_maps_to_not_configured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/pages"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let err = gateway.get_pages().await.unwrap_err();

    assert!(matches!(err, Error::NotConfigured));
}

#[tokio::test]
async fn test_repository_fetch_error_keeps_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Forbidden"
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let err = gateway.get_repository().await.unwrap_err();

    assert!(
        matches!(err, Error::Api { status: 403, .. }),
        "a 404 sentinel must not swallow other statuses: {err:?}"
    );
}

#[tokio::test]
async fn test_label_routes_encode_reserved_characters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    gateway
        .delete_label("good first issue")
        .await
        .expect("deleting a label with spaces in its name should succeed");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.path(),
        "/repos/test-org/test-repo/labels/good%20first%20issue"
    );
}

#[tokio::test]
async fn test_branch_routes_encode_slashes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Branch not protected"
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let err = gateway.get_branch_protection("release/1.x").await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.path(),
        "/repos/test-org/test-repo/branches/release%2F1.x/protection"
    );
}

#[tokio::test]
async fn test_list_secret_names() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/test-repo/actions/secrets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "secrets": [
                { "name": "API_KEY", "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z" },
                { "name": "DEPLOY_TOKEN", "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let names = gateway.list_secret_names().await.unwrap();

    assert_eq!(names, vec!["API_KEY".to_string(), "DEPLOY_TOKEN".to_string()]);
}
