//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default GitHub REST API endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default upstream request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on the size of a rendered response, in characters.
pub const DEFAULT_MAX_RESPONSE_CHARS: usize = 100_000;

/// Hosts allowed to use plain HTTP for the API base URL (local mocks and proxies).
const LOCALHOST_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream GitHub API settings.
    pub github: GithubConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Problems met while reading the environment. Logged by
    /// [`Config::log_warnings`] once a subscriber is installed.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Settings for talking to the GitHub REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base endpoint, without a trailing slash.
    pub api_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Longest rendered response before truncation. `0` disables truncation.
    pub max_response_chars: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// GitHub personal access token. Without it, requests are anonymous and
    /// rate-limited, and issue creation is unavailable.
    pub github_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("github-mcp-server/{}", env!("CARGO_PKG_VERSION")),
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "github-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            github: GithubConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_` (for example `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`). The GitHub token is read from `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            match timestamps.parse() {
                Ok(enabled) => config.logging.with_timestamps = enabled,
                Err(_) => config.warnings.push(format!(
                    "Ignoring invalid MCP_LOG_TIMESTAMPS={:?}, timestamps stay on",
                    timestamps
                )),
            }
        }

        config.transport = TransportConfig::from_env(&mut config.warnings);

        if let Ok(api_url) = std::env::var("MCP_GITHUB_API_URL") {
            config.github.api_url = api_url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("MCP_GITHUB_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.github.timeout_secs = secs,
                Err(_) => config.warnings.push(format!(
                    "Ignoring invalid MCP_GITHUB_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.github.timeout_secs
                )),
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_GITHUB_USER_AGENT") {
            config.github.user_agent = user_agent;
        }

        if let Ok(max_chars) = std::env::var("MCP_MAX_RESPONSE_CHARS") {
            match max_chars.parse() {
                Ok(max_chars) => config.github.max_response_chars = max_chars,
                Err(_) => config.warnings.push(format!(
                    "Ignoring invalid MCP_MAX_RESPONSE_CHARS={:?}, using {}",
                    max_chars, config.github.max_response_chars
                )),
            }
        }

        // Absence is reported by the server once logging is up.
        config.credentials.github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        config
    }

    /// Emit the warnings collected while loading. `from_env` runs before the
    /// subscriber exists, so nothing it logged directly would be seen.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }

    /// Check that the configuration can be used to reach the GitHub API.
    ///
    /// Non-local hosts must use HTTPS so the bearer token never travels in the clear.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.github.api_url).map_err(|e| {
            Error::config(format!(
                "invalid GitHub API URL '{}': {}",
                self.github.api_url, e
            ))
        })?;

        let host = url
            .host_str()
            .ok_or_else(|| Error::config("GitHub API URL must include a host"))?;

        let is_local = LOCALHOST_HOSTS
            .iter()
            .any(|local| host.eq_ignore_ascii_case(local));

        if !is_local && url.scheme() != "https" {
            return Err(Error::config(format!(
                "GitHub API URL must use https for non-local hosts; got '{}://'",
                url.scheme()
            )));
        }

        if self.github.timeout_secs == 0 {
            return Err(Error::config("GitHub request timeout must be at least 1 second"));
        }

        Ok(())
    }
}
