//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests, so plain HTTP clients
//! (curl, browsers, etc.) can talk to the MCP server without a session
//! transport.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// MCP protocol revision announced by `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Standard JSON-RPC 2.0 error codes used by this endpoint.
pub mod codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

/// An incoming JSON-RPC call. `params` stays untyped until a method claims it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcCall {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl RpcCall {
    fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|p| p.get(key))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcFault {
    pub code: i32,
    pub message: String,
}

/// Reply to an [`RpcCall`]: exactly one of `result` or `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcReply {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcFault>,
}

impl RpcReply {
    pub fn ok(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn fault(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(RpcFault {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Application state shared across HTTP handlers. Read-only.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
}

impl AppState {
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// JSON-RPC on the configured path, plus `/health` and a `/` info page.
    pub fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(rpc_endpoint))
            .route("/health", get(health))
            .route("/", get(info_page))
            .with_state(AppState::new(server))
            .layer(TraceLayer::new_for_http());

        if !self.config.enable_cors {
            return app;
        }
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }

    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.bind_address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            rpc = %self.config.rpc_path,
            cors = self.config.enable_cors,
            "Ready - listening on http://{}",
            addr
        );

        axum::serve(listener, app)
            .await
            .map_err(TransportError::serve)
    }
}

async fn info_page(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "protocol": "JSON-RPC 2.0 over HTTP POST",
        "health": "/health"
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method = %call.method))]
async fn rpc_endpoint(State(state): State<AppState>, Json(call): Json<RpcCall>) -> Response {
    debug!("JSON-RPC call received");
    match process_request(&state, call).await {
        Some(reply) => (StatusCode::OK, Json(reply)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Route one JSON-RPC call. Tool and resource failures are successful
/// replies carrying an error envelope; faults are for malformed calls only.
/// Notifications get no reply.
pub async fn process_request(state: &AppState, call: RpcCall) -> Option<RpcReply> {
    if call.jsonrpc != "2.0" {
        return Some(RpcReply::fault(call.id, codes::INVALID_REQUEST, "Invalid Request"));
    }
    if call.method.starts_with("notifications/") {
        debug!("Notification {} acknowledged", call.method);
        return None;
    }

    let server = &state.server;
    let result = match call.method.as_str() {
        "initialize" => json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {}, "resources": {} },
            "serverInfo": { "name": server.name(), "version": server.version() },
            "instructions": server.instructions()
        }),
        "tools/list" => json!({ "tools": server.list_tools_json() }),
        "tools/call" => {
            let Some(name) = call.param("name").and_then(Value::as_str) else {
                return Some(RpcReply::fault(
                    call.id.clone(),
                    codes::INVALID_PARAMS,
                    "Missing tool name",
                ));
            };
            let arguments = match call.param("arguments") {
                None | Some(Value::Null) => None,
                Some(Value::Object(map)) => Some(map.clone()),
                Some(_) => {
                    return Some(RpcReply::fault(
                        call.id.clone(),
                        codes::INVALID_PARAMS,
                        "Tool arguments must be an object",
                    ));
                }
            };
            server.call_tool_json(name, arguments).await
        }
        "resources/list" => json!({ "resources": server.list_resources_json().await }),
        "resources/templates/list" => {
            json!({ "resourceTemplates": server.list_resource_templates_json().await })
        }
        "resources/read" => {
            let Some(uri) = call.param("uri").and_then(Value::as_str) else {
                return Some(RpcReply::fault(
                    call.id.clone(),
                    codes::INVALID_PARAMS,
                    "Missing resource URI",
                ));
            };
            server.read_resource_json(uri).await
        }
        method => {
            warn!("Unknown JSON-RPC method: {}", method);
            return Some(RpcReply::fault(
                call.id.clone(),
                codes::METHOD_NOT_FOUND,
                "Method not found",
            ));
        }
    };

    Some(RpcReply::ok(call.id, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::github::testing::{RecordingUpstream, test_gateway};
    use std::sync::Arc;

    fn state(upstream: Arc<RecordingUpstream>) -> AppState {
        AppState::new(McpServer::with_gateway(
            Config::default(),
            test_gateway(upstream, None),
        ))
    }

    async fn reply(state: &AppState, call: RpcCall) -> RpcReply {
        process_request(state, call)
            .await
            .expect("calls with an id always get a reply")
    }

    fn rpc(method: &str, params: Value) -> RpcCall {
        RpcCall {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let state = state(RecordingUpstream::new());

        let init = reply(&state, rpc("initialize", json!({}))).await;
        assert_eq!(init.result.unwrap()["protocolVersion"], PROTOCOL_VERSION);

        let tools = reply(&state, rpc("tools/list", json!({}))).await;
        assert_eq!(tools.result.unwrap()["tools"].as_array().unwrap().len(), 5);

        let templates = reply(&state, rpc("resources/templates/list", json!({}))).await;
        assert_eq!(
            templates.result.unwrap()["resourceTemplates"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_tools_call_reports_tool_errors_in_result() {
        let upstream = RecordingUpstream::new();
        let state = state(upstream.clone());

        let response = reply(
            &state,
            rpc("tools/call", json!({ "name": "create_issue", "arguments": { "owner": "o", "repo": "r", "title": "t" } })),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["content"][0]["text"],
            "Error: GitHub token required for creating issues"
        );
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_tools_call_rejects_non_object_arguments() {
        let state = state(RecordingUpstream::new());
        let response = reply(
            &state,
            rpc("tools/call", json!({ "name": "list_user_repos", "arguments": [1, 2] })),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_resources_read() {
        let upstream = RecordingUpstream::new().reply(200, json!({ "login": "octocat" }));
        let state = state(upstream.clone());

        let response =
            reply(&state, rpc("resources/read", json!({ "uri": "github://user" }))).await;
        let result = response.result.unwrap();
        assert!(
            result["contents"][0]["text"]
                .as_str()
                .unwrap()
                .contains("\"login\": \"octocat\"")
        );
        assert_eq!(upstream.last_request().path, "/user");
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let state = state(RecordingUpstream::new());
        let mut note = rpc("notifications/initialized", json!({}));
        note.id = None;
        assert!(process_request(&state, note).await.is_none());
        assert!(
            process_request(&state, rpc("notifications/cancelled", json!({})))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let state = state(RecordingUpstream::new());

        let mut bad_version = rpc("tools/list", json!({}));
        bad_version.jsonrpc = "1.0".to_string();
        assert_eq!(
            reply(&state, bad_version).await.error.unwrap().code,
            -32600
        );

        let unknown = reply(&state, rpc("prompts/list", json!({}))).await;
        assert_eq!(unknown.error.unwrap().code, -32601);

        let missing_uri = reply(&state, rpc("resources/read", json!({}))).await;
        assert_eq!(missing_uri.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_router_serves_rpc_and_health() {
        let server = McpServer::with_gateway(
            Config::default(),
            test_gateway(RecordingUpstream::new(), None),
        );
        let app = HttpTransport::new(HttpConfig::default()).router(server);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::new();
        let health: Value = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "healthy");

        let reply: Value = client
            .post(format!("http://{}/mcp", addr))
            .json(&json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(reply["id"], 7);
        assert_eq!(reply["result"]["tools"].as_array().unwrap().len(), 5);

        let note = client
            .post(format!("http://{}/mcp", addr))
            .json(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .send()
            .await
            .unwrap();
        assert_eq!(note.status(), reqwest::StatusCode::NO_CONTENT);
        assert!(note.bytes().await.unwrap().is_empty());
    }
}
