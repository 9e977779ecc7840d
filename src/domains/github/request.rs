//! Outbound request construction.
//!
//! Every GitHub call goes through [`RequestBuilder`], which owns the protocol
//! headers and the credential so individual tools only describe a method,
//! a path and their query parameters.

use std::fmt;
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde_json::Value;

use super::context::GithubContext;
use super::error::GithubError;
use crate::domains::resources::{ResourceDescriptor, ResourceKind};

/// Hard ceiling GitHub applies to `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Media type requested from the API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version pinned by this server.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// RFC 3986 unreserved characters stay literal; everything else is escaped,
/// including `/ ? & = #` and space (as `%20`).
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Clamp a caller-supplied page size to what the API accepts.
pub fn clamp_per_page(requested: u32) -> u32 {
    requested.min(MAX_PER_PAGE)
}

/// Percent-encode a single query value or path segment.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// True when `segment` is `.` or `..`, which URL parsers collapse.
pub fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// True when any `/`-separated segment of `path` is `.` or `..`.
pub fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(is_dot_segment)
}

/// Percent-encode a repository path segment by segment, keeping the `/`
/// separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// `/repos/{owner}/{repo}` with both segments escaped.
pub fn repo_path(owner: &str, repo: &str) -> String {
    format!(
        "/repos/{}/{}",
        encode_component(owner),
        encode_component(repo)
    )
}

/// `/repos/{owner}/{repo}/contents[/{path}]`.
///
/// The file path loses any leading `/` and each of its segments is escaped,
/// so `#` and `?` stay part of the name. Callers reject `.` and `..`
/// segments before getting here.
pub fn contents_path(owner: &str, repo: &str, path: &str) -> String {
    let mut endpoint = format!("{}/contents", repo_path(owner, repo));
    let path = path.trim_start_matches('/');
    if !path.is_empty() {
        endpoint.push('/');
        endpoint.push_str(&encode_path(path));
    }
    endpoint
}

/// A fully described HTTP request, ready for an [`UpstreamClient`](super::UpstreamClient).
#[derive(Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// API-relative path, starting with `/`.
    pub path: String,
    /// Query parameters, unencoded.
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    /// Protocol headers sent on every request.
    pub headers: Vec<(&'static str, String)>,
    /// Full `Authorization` header value, when a token is provisioned.
    pub auth_header: Option<String>,
}

impl OutboundRequest {
    /// Append a query parameter.
    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up the raw (unencoded) value of a query parameter.
    #[cfg(test)]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a protocol header by case-insensitive name.
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path plus encoded query string.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }

    /// Absolute URL against the given API base.
    pub fn url(&self, api_url: &str) -> String {
        format!("{}{}", api_url.trim_end_matches('/'), self.path_and_query())
    }
}

impl fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("auth_header", &self.auth_header.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Builds [`OutboundRequest`]s with the protocol headers and credential attached.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    ctx: Arc<GithubContext>,
}

impl RequestBuilder {
    pub fn new(ctx: Arc<GithubContext>) -> Self {
        Self { ctx }
    }

    /// Start a `GET` request.
    pub fn get(&self, path: impl Into<String>) -> OutboundRequest {
        self.request(Method::GET, path)
    }

    /// Start a `POST` request with a JSON body.
    pub fn post(&self, path: impl Into<String>, body: Value) -> OutboundRequest {
        self.request(Method::POST, path).json(body)
    }

    fn request(&self, method: Method, path: impl Into<String>) -> OutboundRequest {
        OutboundRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: vec![
                ("Accept", GITHUB_ACCEPT.to_string()),
                ("X-GitHub-Api-Version", GITHUB_API_VERSION.to_string()),
                ("User-Agent", self.ctx.user_agent.clone()),
            ],
            auth_header: self
                .ctx
                .token
                .as_ref()
                .map(|token| format!("Bearer {}", token)),
        }
    }

    /// Fail fast when an operation needs a token and none is configured.
    pub fn require_auth(&self, action: &'static str) -> Result<(), GithubError> {
        if self.ctx.is_authenticated() {
            Ok(())
        } else {
            Err(GithubError::AuthRequired(action))
        }
    }

    /// Map a resolved resource onto its API endpoint.
    pub fn for_resource(&self, descriptor: &ResourceDescriptor) -> OutboundRequest {
        match descriptor.kind {
            ResourceKind::Repositories => self
                .get("/user/repos")
                .query("per_page", MAX_PER_PAGE)
                .query("sort", "updated"),
            ResourceKind::User => self.get("/user"),
            ResourceKind::RepoDetail => {
                self.get(repo_path(descriptor.owner(), descriptor.repo()))
            }
            ResourceKind::File => self.get(contents_path(
                descriptor.owner(),
                descriptor.repo(),
                descriptor.path(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::resources::resolve;

    fn builder(token: Option<&str>) -> RequestBuilder {
        let mut config = Config::default();
        config.credentials.github_token = token.map(str::to_string);
        RequestBuilder::new(Arc::new(GithubContext::from_config(&config)))
    }

    #[test]
    fn test_clamp_per_page() {
        assert_eq!(clamp_per_page(30), 30);
        assert_eq!(clamp_per_page(100), 100);
        assert_eq!(clamp_per_page(150), 100);
        assert_eq!(clamp_per_page(u32::MAX), 100);
    }

    #[test]
    fn test_encode_component_escapes_reserved() {
        assert_eq!(encode_component("mcp server"), "mcp%20server");
        assert_eq!(encode_component("a/b?c&d=e#f"), "a%2Fb%3Fc%26d%3De%23f");
        assert_eq!(encode_component("rust-lang_~x.y"), "rust-lang_~x.y");
        assert_eq!(encode_component("language:rust"), "language%3Arust");
    }

    #[test]
    fn test_contents_path_keeps_separators() {
        assert_eq!(
            contents_path("octo", "hello", "/src/lib.rs"),
            "/repos/octo/hello/contents/src/lib.rs"
        );
        assert_eq!(
            contents_path("octo", "hello", ""),
            "/repos/octo/hello/contents"
        );
    }

    #[test]
    fn test_contents_path_escapes_each_segment() {
        assert_eq!(
            contents_path("octo", "hello", "docs/notes#1.md"),
            "/repos/octo/hello/contents/docs/notes%231.md"
        );
        assert_eq!(
            contents_path("octo", "hello", "what?.txt"),
            "/repos/octo/hello/contents/what%3F.txt"
        );
        assert_eq!(
            contents_path("octo", "hello", "my dir/a&b=c.rs"),
            "/repos/octo/hello/contents/my%20dir/a%26b%3Dc.rs"
        );
    }

    #[test]
    fn test_dot_segments_detected() {
        assert!(has_dot_segment(".."));
        assert!(has_dot_segment("src/../../../user/repos"));
        assert!(has_dot_segment("./README.md"));
        assert!(!has_dot_segment(".github/workflows/ci.yml"));
        assert!(!has_dot_segment("notes..md"));
        assert!(is_dot_segment("."));
        assert!(!is_dot_segment("..."));
    }

    #[test]
    fn test_repo_path_escapes_segments() {
        assert_eq!(repo_path("octo", "../x"), "/repos/octo/..%2Fx");
    }

    #[test]
    fn test_protocol_headers_always_present() {
        let request = builder(None).get("/user");
        assert_eq!(request.header("accept"), Some(GITHUB_ACCEPT));
        assert_eq!(request.header("X-GitHub-Api-Version"), Some(GITHUB_API_VERSION));
        assert!(request.header("User-Agent").unwrap().starts_with("github-mcp-server/"));
        assert!(request.auth_header.is_none());
    }

    #[test]
    fn test_auth_header_injected_when_token_present() {
        let request = builder(Some("ghp_abc")).get("/user");
        assert_eq!(request.auth_header.as_deref(), Some("Bearer ghp_abc"));
        assert!(!format!("{:?}", request).contains("ghp_abc"));
    }

    #[test]
    fn test_require_auth() {
        assert!(builder(Some("ghp_abc")).require_auth("creating issues").is_ok());
        let err = builder(None).require_auth("creating issues").unwrap_err();
        assert!(matches!(err, GithubError::AuthRequired(_)));
        assert_eq!(err.to_string(), "GitHub token required for creating issues");
    }

    #[test]
    fn test_url_renders_encoded_query() {
        let request = builder(None)
            .get("/search/repositories")
            .query("q", "mcp server")
            .query("per_page", 100);
        assert_eq!(
            request.url("https://api.github.com/"),
            "https://api.github.com/search/repositories?q=mcp%20server&per_page=100"
        );
        assert_eq!(request.query_param("q"), Some("mcp server"));
    }

    #[test]
    fn test_resource_requests() {
        let b = builder(None);

        let repos = b.for_resource(&resolve("github://repositories").unwrap());
        assert_eq!(repos.path_and_query(), "/user/repos?per_page=100&sort=updated");

        let user = b.for_resource(&resolve("github://user").unwrap());
        assert_eq!(user.path_and_query(), "/user");

        let repo = b.for_resource(&resolve("github://repo/rust-lang/rust").unwrap());
        assert_eq!(repo.path, "/repos/rust-lang/rust");

        let file = b.for_resource(&resolve("github://file/rust-lang/rust/src/main.rs").unwrap());
        assert_eq!(file.path, "/repos/rust-lang/rust/contents/src/main.rs");
        assert_eq!(file.method, Method::GET);

        let file = b.for_resource(&resolve("github://file/octo/hello/a b/c?d.md").unwrap());
        assert_eq!(file.path, "/repos/octo/hello/contents/a%20b/c%3Fd.md");
    }
}
