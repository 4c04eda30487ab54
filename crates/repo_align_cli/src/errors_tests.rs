//! Tests for the CLI error type.

use config_model::ConfigError;

use super::*;

#[test]
fn test_config_error_message_names_source() {
    let err = Error::from(ConfigError::CircularReference {
        reference: "base.yml".to_string(),
    });
    let message = err.to_string();
    assert!(message.starts_with("Configuration error:"), "got: {message}");
    assert!(message.contains("base.yml"), "got: {message}");
}

#[test]
fn test_missing_token_mentions_both_sources() {
    let message = Error::MissingToken.to_string();
    assert!(message.contains("--token"));
    assert!(message.contains("GITHUB_TOKEN"));
}

#[test]
fn test_io_errors_name_the_right_stream() {
    assert_eq!(
        Error::StdOutFlushFailed.to_string(),
        "Failed to flush the std out buffer."
    );
    assert_eq!(
        Error::StdInReadFailed.to_string(),
        "Failed to read from std in."
    );
}

#[test]
fn test_env_file_error_names_path() {
    let err = Error::EnvFile {
        path: "/tmp/.env".to_string(),
        reason: "permission denied".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Failed to load env file /tmp/.env: permission denied"
    );
}
