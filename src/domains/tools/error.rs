//! Tool-specific error types.

use thiserror::Error;

use crate::domains::github::GithubError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments are missing, mistyped, or empty where a value is required.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Building or executing the upstream call failed.
    #[error(transparent)]
    Github(#[from] GithubError),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
