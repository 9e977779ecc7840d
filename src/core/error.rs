//! Crate-wide error type.
//!
//! Each domain keeps its own error enum; this one wraps them so startup code
//! and library callers can use a single `Result`.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::{github::GithubError, resources::ResourceError, tools::ToolError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),

    /// The configuration cannot be used as given.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_convert() {
        let err: Error = ToolError::unknown("nope").into();
        assert_eq!(err.to_string(), "Tool error: Unknown tool: nope");

        let err: Error = GithubError::AuthRequired("creating issues").into();
        assert!(matches!(err, Error::Github(_)));
    }
}
