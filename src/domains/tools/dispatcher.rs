//! Tool dispatcher: name + arguments → envelope.
//!
//! Every call runs lookup → parse → build → execute → normalize. Failures in
//! any phase end up as an error envelope; nothing is retried.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use tracing::{debug, info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use crate::domains::github::{GithubGateway, ResponseEnvelope};

/// Routes tool calls to their typed definitions and the GitHub gateway.
pub struct ToolDispatcher {
    gateway: Arc<GithubGateway>,
    registry: ToolRegistry,
}

impl ToolDispatcher {
    pub fn new(gateway: Arc<GithubGateway>) -> Self {
        let registry = ToolRegistry::new();
        info!(tools = ?registry.tool_names(), "Initializing ToolDispatcher");
        Self { gateway, registry }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        ToolRegistry::get_all_tools()
    }

    /// Run one tool call. Lookup and argument errors never reach the network.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<ResponseEnvelope, ToolError> {
        let kind = self.registry.lookup(name)?;
        let invocation = kind.parse(arguments.unwrap_or_default())?;
        debug!(phase = "building", tool = invocation.kind().name());
        let request = invocation.build_request(self.gateway.builder())?;
        Ok(self
            .gateway
            .fetch(request, &invocation.render_hint())
            .await?)
    }

    /// Run one tool call, rendering any failure into the envelope.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> ResponseEnvelope {
        match self.dispatch(name, arguments).await {
            Ok(envelope) => {
                info!("Tool {} completed", name);
                envelope
            }
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                ResponseEnvelope::error(e)
            }
        }
    }
}
