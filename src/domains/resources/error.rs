//! Resource-specific error types.

use thiserror::Error;

use crate::domains::github::GithubError;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The URI matches none of the declared resource classes.
    #[error("Unknown resource URI: {0}")]
    UnknownResource(String),

    /// The upstream call behind the resource failed.
    #[error(transparent)]
    Github(#[from] GithubError),
}

impl ResourceError {
    /// Create a new "unknown resource" error.
    pub fn unknown(uri: impl Into<String>) -> Self {
        Self::UnknownResource(uri.into())
    }
}
