//! CredHub error types using thiserror 2.0.
//!
//! Provides a single error taxonomy for all client operations, with
//! retryability classification. The client itself never retries; the
//! classification is advisory for callers that apply their own policy.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by CredHub client operations.
#[derive(Error, Debug)]
pub enum CredHubError {
    /// The service responded with a non-2xx status. The message carries the
    /// status code and, when the error payload could be parsed, the
    /// service-supplied description.
    #[error("CredHub returned status {status}: {}", .message.as_deref().unwrap_or("no error message provided"))]
    Server {
        /// HTTP status returned by the service
        status: StatusCode,
        /// Human-readable message extracted from the error payload, if any
        message: Option<String>,
    },

    /// A success status arrived with a missing or malformed body, or a
    /// request body could not be serialized. Distinct from [`Self::Server`]
    /// so callers can tell a bad payload apart from a remote failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level failure (connection, TLS handshake, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OAuth2 token acquisition failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for CredHub operations.
pub type CredHubResult<T> = Result<T, CredHubError>;

impl CredHubError {
    /// Check if error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Server { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Http(_) => true,
            _ => false,
        }
    }

    /// Create a server error from a status and optional service message.
    #[must_use]
    pub fn server(status: StatusCode, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_contains_status() {
        let err = CredHubError::server(StatusCode::UNAUTHORIZED, None);
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("no error message provided"));
    }

    #[test]
    fn test_server_error_contains_service_message() {
        let err = CredHubError::server(
            StatusCode::BAD_REQUEST,
            Some("The request could not be fulfilled".to_string()),
        );
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("The request could not be fulfilled"));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(CredHubError::server(StatusCode::SERVICE_UNAVAILABLE, None).is_retryable());
        assert!(CredHubError::server(StatusCode::TOO_MANY_REQUESTS, None).is_retryable());
        assert!(!CredHubError::server(StatusCode::NOT_FOUND, None).is_retryable());
        assert!(!CredHubError::invalid_config("missing base URL").is_retryable());
        assert!(!CredHubError::auth_failed("bad client secret").is_retryable());
    }
}
