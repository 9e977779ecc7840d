//! Shared, read-only settings for every GitHub component.

use std::fmt;
use std::time::Duration;

use crate::core::config::Config;

/// Everything the request builder, client and normalizer need to know about
/// the upstream API.
///
/// Built once at startup and shared behind an `Arc`; nothing here changes
/// after construction.
#[derive(Clone)]
pub struct GithubContext {
    /// Base endpoint without a trailing slash.
    pub api_url: String,
    /// Bearer token, if one was provisioned.
    pub token: Option<String>,
    /// Upper bound on a single upstream round trip.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Truncation limit for rendered responses (`0` = unlimited).
    pub max_response_chars: usize,
}

impl GithubContext {
    /// Derive the context from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_url: config.github.api_url.trim_end_matches('/').to_string(),
            token: config.credentials.github_token.clone(),
            timeout: Duration::from_secs(config.github.timeout_secs),
            user_agent: config.github.user_agent.clone(),
            max_response_chars: config.github.max_response_chars,
        }
    }

    /// Whether requests will carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for GithubContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubContext")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_response_chars", &self.max_response_chars)
            .finish()
    }
}
