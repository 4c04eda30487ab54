//! Error types for gateway operations.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while fetching or mutating live repository state.
///
/// [`Error::NotConfigured`] is a distinguished sentinel: GitHub reports a
/// missing branch protection rule or a disabled Pages site as a 404, and the
/// comparators turn that into an `Add` change instead of failing the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested sub-resource is not configured on the repository.
    #[error("resource not configured")]
    NotConfigured,

    /// GitHub rejected the request.
    #[error("GitHub API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a GitHub response.
    #[error("GitHub request failed: {0}")]
    Request(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The response did not have the expected shape.
    #[error("Unexpected GitHub response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Maps an octocrab error, preserving the status code when GitHub
    /// answered and marking 404s on optional sub-resources as
    /// [`Error::NotConfigured`].
    pub(crate) fn from_octocrab(err: octocrab::Error, optional_resource: bool) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                if status == 404 && optional_resource {
                    Error::NotConfigured
                } else {
                    Error::Api {
                        status,
                        message: source.message.clone(),
                    }
                }
            }
            other => Error::Request(other.to_string()),
        }
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, Error>;
