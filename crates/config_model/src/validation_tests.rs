//! Tests for the validation module.

use super::*;
use crate::document::RepoConfig;
use crate::errors::ConfigError;

fn doc(yaml: &str) -> RepoConfig {
    serde_yaml::from_str(yaml).expect("test document should parse")
}

#[test]
fn test_empty_document_is_valid() {
    validate(&RepoConfig::new()).expect("empty document should validate");
}

#[test]
fn test_valid_names_pass() {
    let config = doc(
        "secrets: [API_KEY, _internal, deploy2prod]\nenv:\n  variables:\n    LOG_LEVEL: info\n",
    );
    validate(&config).expect("well-formed names should validate");
}

#[test]
fn test_name_starting_with_digit_is_rejected() {
    let config = doc("secrets: [1BAD]\n");
    let err = validate(&config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidName { kind: "secret", ref name, .. } if name == "1BAD"
    ));
}

#[test]
fn test_name_with_dash_is_rejected() {
    let config = doc("env:\n  variables:\n    BAD-NAME: x\n");
    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidName { kind: "variable", .. }));
}

#[test]
fn test_reserved_prefix_is_rejected_case_insensitively() {
    let config = doc("secrets: [GITHUB_TOKEN]\n");
    assert!(validate(&config).is_err());

    let config = doc("secrets: [github_token]\n");
    assert!(
        validate(&config).is_err(),
        "reserved prefix check should ignore case"
    );
}

#[test]
fn test_env_secret_names_are_validated_too() {
    let config = doc("env:\n  secrets: [\"BAD NAME\"]\n");
    assert!(validate(&config).is_err());
}
