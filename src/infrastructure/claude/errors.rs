use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::{ErrorKind, RetryableError};

/// Errors that can occur when interacting with the Claude API
#[derive(Error, Debug)]
pub enum ClaudeApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid key or insufficient permissions (HTTP 401, 403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Unknown model or endpoint (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// API server is overloaded (HTTP 529)
    #[error("API server overloaded")]
    Overloaded,

    /// Server error from Claude API (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Request timed out waiting for a response
    #[error("Request timeout")]
    Timeout,

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    /// Response body did not match the Messages API schema
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No API key was configured
    #[error("Missing API key - set anthropic.api_key or ANTHROPIC_API_KEY")]
    MissingApiKey,

    /// Any other status code
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl ClaudeApiError {
    /// Map a non-success HTTP status and its body to an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dead_air::infrastructure::claude::ClaudeApiError;
    /// use reqwest::StatusCode;
    ///
    /// let error = ClaudeApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new());
    /// assert!(matches!(error, ClaudeApiError::RateLimitExceeded));
    /// assert!(error.is_transient());
    /// ```
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            404 => Self::NotFound(body),
            408 => Self::Timeout,
            429 => Self::RateLimitExceeded,
            529 => Self::Overloaded,
            _ if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// Returns true if this error is transient and should be retried
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded
                | Self::Overloaded
                | Self::ServerError(_, _)
                | Self::Timeout
                | Self::NetworkError(_)
                | Self::JsonError(_)
        )
    }

    /// Returns true if this is a permanent error that should not be retried
    pub const fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<reqwest::Error> for ClaudeApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::NetworkError(err)
        }
    }
}

impl RetryableError for ClaudeApiError {
    fn kind(&self) -> ErrorKind {
        if self.is_transient() {
            ErrorKind::Transient
        } else {
            ErrorKind::Permanent
        }
    }
}
