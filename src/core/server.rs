//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool dispatcher and the resource service.
//! Both share one [`GithubGateway`], built once from the configuration.
//!
//! **Adding a new tool or resource does NOT require modifying this file!**

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::github::{GithubContext, GithubGateway, ResponseEnvelope};
use crate::domains::{resources::ResourceService, tools::ToolDispatcher};

const INSTRUCTIONS: &str = "GitHub MCP server. Tools search repositories, browse and read files, \
list the authenticated user's repositories and open issues. Resources under github:// expose \
the user's repositories, profile, repository details and file contents.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Routes tool calls to their definitions.
    tools: Arc<ToolDispatcher>,

    /// Service for handling resource-related requests.
    resources: Arc<ResourceService>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured GitHub endpoint.
    pub fn new(config: Config) -> Result<Self> {
        let ctx = Arc::new(GithubContext::from_config(&config));
        let gateway = Arc::new(GithubGateway::new(ctx)?);
        Ok(Self::with_gateway(config, gateway))
    }

    /// Create a server over an existing gateway.
    pub fn with_gateway(config: Config, gateway: Arc<GithubGateway>) -> Self {
        info!(
            authenticated = gateway.context().is_authenticated(),
            api_url = %gateway.context().api_url,
            "Initializing MCP server"
        );
        if !gateway.context().is_authenticated() {
            warn!(
                "GITHUB_TOKEN not set: requests are unauthenticated and rate-limited, \
                 and create_issue is unavailable"
            );
        }
        Self {
            config: Arc::new(config),
            tools: Arc::new(ToolDispatcher::new(gateway.clone())),
            resources: Arc::new(ResourceService::new(gateway)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Run a tool call unless `cancelled` resolves first.
    ///
    /// Cancellation wins ties and drops the in-flight call; the caller gets an
    /// error envelope instead of a protocol error.
    pub async fn call_tool_until<C>(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        cancelled: C,
    ) -> ResponseEnvelope
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancelled => {
                warn!("Tool call {} cancelled", name);
                ResponseEnvelope::error("request cancelled")
            }
            envelope = self.tools.call_tool(name, arguments) => envelope,
        }
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<Value> {
        self.tools
            .list_tools()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport). Failures are reported in the
    /// result body with `isError` set.
    pub async fn call_tool_json(&self, name: &str, arguments: Option<JsonObject>) -> Value {
        let result = self
            .call_tool_until(name, arguments, std::future::pending())
            .await
            .into_call_tool_result();
        json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        })
    }

    /// List all available resources as JSON (for HTTP transport).
    pub async fn list_resources_json(&self) -> Vec<Value> {
        self.resources
            .list_resources()
            .await
            .into_iter()
            .map(|r| {
                json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect()
    }

    /// List all available resource templates as JSON (for HTTP transport).
    pub async fn list_resource_templates_json(&self) -> Vec<Value> {
        self.resources
            .list_resource_templates()
            .await
            .into_iter()
            .map(|t| {
                json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI as JSON (for HTTP transport).
    pub async fn read_resource_json(&self, uri: &str) -> Value {
        let result = self.resources.read_resource(uri).await;
        json!({ "contents": result.contents })
    }
}

/// ServerHandler implementation. Tools and resources are listed from their
/// registries; nothing here knows individual tools.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let envelope = self
            .call_tool_until(&request.name, request.arguments, context.ct.cancelled())
            .await;
        Ok(envelope.into_call_tool_result())
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resources.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resources.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        Ok(self.resources.read_resource(&request.uri).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::github::testing::{RecordingUpstream, test_gateway};
    use tokio_test::assert_ok;

    fn server(upstream: Arc<RecordingUpstream>) -> McpServer {
        McpServer::with_gateway(Config::default(), test_gateway(upstream, None))
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[test]
    fn test_server_info() {
        let server = server(RecordingUpstream::new());
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, server.name());
        assert_eq!(info.server_info.version, server.version());
    }

    #[test]
    fn test_new_with_default_config() {
        let server = assert_ok!(McpServer::new(Config::default()));
        assert_eq!(server.config().server.name, server.name());
    }

    #[tokio::test]
    async fn test_cancelled_call_reports_error_without_network() {
        let upstream = RecordingUpstream::new();
        let server = server(upstream.clone());

        let envelope = server
            .call_tool_until(
                "get_repository_files",
                args(json!({ "owner": "octo", "repo": "hello" })),
                std::future::ready(()),
            )
            .await;

        assert!(envelope.is_error());
        assert_eq!(envelope.text(), "Error: request cancelled");
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_uncancelled_call_completes() {
        let upstream = RecordingUpstream::new().reply(200, json!([]));
        let server = server(upstream.clone());

        let envelope = server
            .call_tool_until(
                "get_repository_files",
                args(json!({ "owner": "octo", "repo": "hello" })),
                std::future::pending(),
            )
            .await;

        assert!(!envelope.is_error());
        assert!(envelope.text().starts_with("Entries (0 found)"));
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let server = server(RecordingUpstream::new());

        assert_eq!(server.list_tools_json().len(), 5);
        assert_eq!(server.list_resources_json().await.len(), 2);
        assert_eq!(server.list_resource_templates_json().await.len(), 2);

        let unknown = server.call_tool_json("nope", None).await;
        assert_eq!(unknown["isError"], json!(true));
        assert_eq!(unknown["content"][0]["text"], "Error: Unknown tool: nope");

        let missing = server.read_resource_json("github://nope").await;
        assert!(
            missing["contents"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Error: Unknown resource URI")
        );
    }
}
