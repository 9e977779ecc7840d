//! Shared helpers for tool definitions.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::domains::github::{
    GithubError, OutboundRequest, RenderHint, RequestBuilder, has_dot_segment, is_dot_segment,
};
use crate::domains::tools::ToolError;

/// Default result count for repository search.
pub fn default_search_limit() -> u32 {
    10
}

/// Default page size for account listings.
pub fn default_per_page() -> u32 {
    30
}

/// Default git ref for file reads.
pub fn default_ref() -> String {
    "main".to_string()
}

/// Reject an empty (or whitespace-only) required string argument.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}

/// Reject an empty owner or repository name, or one that is `.` or `..`.
pub fn require_segment(field: &str, value: &str) -> Result<(), ToolError> {
    require_non_empty(field, value)?;
    if is_dot_segment(value) {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must not be '.' or '..'",
            field
        )));
    }
    Ok(())
}

/// Reject a repository path with `.` or `..` segments.
pub fn require_relative_path(field: &str, value: &str) -> Result<(), ToolError> {
    if has_dot_segment(value) {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must not contain '.' or '..' segments",
            field
        )));
    }
    Ok(())
}

/// A tool exposed to MCP clients, backed by a single GitHub API call.
///
/// Implementors only describe their parameters and how those map onto an
/// outbound request; parsing, schema generation and dispatch are shared.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments, also used to derive the advertised input schema.
    type Params: DeserializeOwned + JsonSchema + 'static;

    /// Checks serde cannot express, such as non-empty strings.
    fn validate(_params: &Self::Params) -> Result<(), ToolError> {
        Ok(())
    }

    /// Map validated arguments onto the upstream request.
    fn build_request(
        params: &Self::Params,
        builder: &RequestBuilder,
    ) -> Result<OutboundRequest, GithubError>;

    /// How the upstream payload is rendered.
    fn render_hint(_params: &Self::Params) -> RenderHint {
        RenderHint::Json
    }

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool::new(
            Self::NAME,
            Self::DESCRIPTION,
            schema_for_type::<Self::Params>(),
        )
    }

    /// Deserialize and validate raw call arguments.
    fn parse(arguments: JsonObject) -> Result<Self::Params, ToolError> {
        let params: Self::Params = serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        Self::validate(&params)?;
        Ok(params)
    }
}
