//! GitHub client error types.

use thiserror::Error;

/// Errors raised while building, sending, or decoding a GitHub API request.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The operation mutates upstream state and no token was provisioned.
    #[error("GitHub token required for {0}")]
    AuthRequired(&'static str),

    /// The API answered with a non-2xx status. The body is kept as-is.
    #[error("GitHub API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("GitHub API request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// DNS, TCP, or TLS failure before a response was received.
    #[error("GitHub API unreachable: {0}")]
    Unreachable(String),

    /// The response payload could not be decoded.
    #[error("Failed to decode GitHub API response: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl GithubError {
    /// Create an HTTP status error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create an "unreachable" error.
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
