//! Transport selection and its settings.

use serde::{Deserialize, Serialize};

/// Which transport to run, with its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    #[cfg(feature = "stdio")]
    Stdio,

    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// Settings for the JSON-RPC-over-HTTP endpoint.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_host")]
    pub host: String,

    pub port: u16,

    /// Route that accepts JSON-RPC `POST`s.
    #[serde(default = "HttpConfig::default_rpc_path")]
    pub rpc_path: String,

    /// Answer CORS preflights from any origin.
    #[serde(default = "HttpConfig::default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl HttpConfig {
    pub const DEFAULT_PORT: u16 = 8080;

    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_rpc_path() -> String {
        "/mcp".to_string()
    }

    fn default_cors() -> bool {
        true
    }

    /// `host:port`, as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH` and `MCP_HTTP_CORS`.
    /// Unusable values are reported through `warnings`.
    pub fn from_env(warnings: &mut Vec<String>) -> Self {
        let defaults = Self::default();

        let port = match std::env::var("MCP_HTTP_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Ignoring invalid MCP_HTTP_PORT={:?}, using {}",
                    raw, defaults.port
                ));
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        let mut rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path);
        if !rpc_path.starts_with('/') {
            rpc_path.insert(0, '/');
        }

        Self {
            host: std::env::var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port,
            rpc_path,
            enable_cors: std::env::var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(defaults.enable_cors),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::DEFAULT_PORT,
            rpc_path: Self::default_rpc_path(),
            enable_cors: Self::default_cors(),
        }
    }
}

#[cfg(not(any(feature = "stdio", feature = "http")))]
compile_error!("enable at least one transport feature: `stdio` or `http`");

impl Default for TransportConfig {
    /// stdio when compiled in, otherwise HTTP on the default port.
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        return Self::Stdio;

        #[cfg(all(feature = "http", not(feature = "stdio")))]
        return Self::Http(HttpConfig::default());
    }
}

impl TransportConfig {
    /// Pick the transport named by `MCP_TRANSPORT`.
    ///
    /// Unknown or not-compiled-in names fall back to the default and leave a
    /// note in `warnings`.
    pub fn from_env(warnings: &mut Vec<String>) -> Self {
        let requested = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match requested.as_str() {
            "" => Self::default(),
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env(warnings)),
            other => {
                let fallback = Self::default();
                warnings.push(format!(
                    "MCP_TRANSPORT={:?} is not available in this build, using {}",
                    other,
                    fallback.description()
                ));
                fallback
            }
        }
    }

    /// Human-readable summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "stdio".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("http://{}{}", cfg.bind_address(), cfg.rpc_path),
        }
    }
}
