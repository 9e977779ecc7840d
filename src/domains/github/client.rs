//! Upstream client: one HTTP round trip per request.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::context::GithubContext;
use super::error::GithubError;
use super::request::OutboundRequest;

/// Raw outcome of a successful upstream call.
#[derive(Debug, Clone)]
pub struct UpstreamResult {
    pub status: u16,
    pub body: Value,
    /// The payload's own `encoding` field (GitHub uses `"base64"` for file contents).
    pub content_encoding: Option<String>,
}

impl UpstreamResult {
    /// Wrap a decoded JSON body, picking up its encoding hint.
    pub fn from_json(status: u16, body: Value) -> Self {
        let content_encoding = body
            .get("encoding")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            status,
            body,
            content_encoding,
        }
    }
}

/// Executes an [`OutboundRequest`] against the GitHub API.
///
/// Implementations perform exactly one round trip and never retry.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn execute(&self, request: OutboundRequest) -> Result<UpstreamResult, GithubError>;
}

/// [`UpstreamClient`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    ctx: Arc<GithubContext>,
    http: Client,
}

impl HttpUpstream {
    /// Build the client with the context's timeout applied to every request.
    pub fn new(ctx: Arc<GithubContext>) -> Result<Self, GithubError> {
        let http = Client::builder()
            .timeout(ctx.timeout)
            .build()
            .map_err(|e| GithubError::Client(e.to_string()))?;
        Ok(Self { ctx, http })
    }

    fn classify(&self, err: reqwest::Error) -> GithubError {
        if err.is_timeout() {
            GithubError::Timeout(self.ctx.timeout)
        } else if err.is_decode() {
            GithubError::decode(err.to_string())
        } else {
            GithubError::unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: OutboundRequest) -> Result<UpstreamResult, GithubError> {
        let url = request.url(&self.ctx.api_url);
        debug!(%url, "sending GitHub request");

        let mut builder = self.http.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(auth) = &request.auth_header {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("Request error: {}", e);
            self.classify(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!("HTTP error {}: {}", status.as_u16(), body);
            return Err(GithubError::http(status.as_u16(), body));
        }

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| GithubError::decode(e.to_string()))?
        };

        debug!(status = status.as_u16(), "GitHub request succeeded");
        Ok(UpstreamResult::from_json(status.as_u16(), body))
    }
}
