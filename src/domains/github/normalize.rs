//! Response normalization.
//!
//! Turns upstream payloads into the single-string [`ResponseEnvelope`]
//! handed back to the caller: base64 file contents are decoded, listings get
//! a count prefix, and everything else is pretty-printed JSON.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use super::client::UpstreamResult;
use super::context::GithubContext;
use super::error::GithubError;

const FILE_SEPARATOR_WIDTH: usize = 50;

/// How the payload of a particular call should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderHint {
    /// Pretty-printed JSON.
    Json,
    /// A collection; rendered with a `"{noun} ({n} found)"` prefix.
    Listing { noun: &'static str },
    /// A contents payload for `path`; base64 payloads are decoded.
    File { path: String },
}

/// The one string returned for every invocation, success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    text: String,
    is_error: bool,
}

impl ResponseEnvelope {
    /// Wrap a rendered success payload.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Render a failure as `Error: <message>`.
    pub fn error(err: impl fmt::Display) -> Self {
        Self {
            text: format!("Error: {}", err),
            is_error: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Convert into the MCP tool result shape.
    pub fn into_call_tool_result(self) -> CallToolResult {
        if self.is_error {
            CallToolResult::error(vec![Content::text(self.text)])
        } else {
            CallToolResult::success(vec![Content::text(self.text)])
        }
    }
}

impl fmt::Display for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders [`UpstreamResult`]s into envelopes.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_chars: usize,
}

impl Normalizer {
    pub fn new(ctx: Arc<GithubContext>) -> Self {
        Self {
            max_chars: ctx.max_response_chars,
        }
    }

    /// Render `result` according to `hint`.
    pub fn normalize(
        &self,
        result: UpstreamResult,
        hint: &RenderHint,
    ) -> Result<ResponseEnvelope, GithubError> {
        let text = match hint {
            RenderHint::File { path } if result.content_encoding.as_deref() == Some("base64") => {
                render_file(path, &result.body)?
            }
            RenderHint::Listing { noun } => {
                let pretty = pretty_json(&result.body)?;
                match listing_len(&result.body) {
                    Some(count) => format!("{} ({} found)\n{}", noun, count, pretty),
                    None => pretty,
                }
            }
            _ => pretty_json(&result.body)?,
        };

        Ok(ResponseEnvelope::success(truncate(text, self.max_chars)))
    }
}

fn pretty_json(body: &Value) -> Result<String, GithubError> {
    serde_json::to_string_pretty(body).map_err(|e| GithubError::decode(e.to_string()))
}

/// Number of entries actually returned: a top-level array, or the `items`
/// array of a search response.
fn listing_len(body: &Value) -> Option<usize> {
    match body {
        Value::Array(entries) => Some(entries.len()),
        Value::Object(map) => map.get("items").and_then(Value::as_array).map(Vec::len),
        _ => None,
    }
}

fn render_file(path: &str, body: &Value) -> Result<String, GithubError> {
    let encoded = body
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| GithubError::decode("base64 payload has no 'content' field"))?;

    // GitHub wraps base64 content at 60 columns.
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GithubError::decode(format!("invalid base64 content: {}", e)))?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => format!(
            "File: {}\nContent:\n{}\n{}",
            path,
            "-".repeat(FILE_SEPARATOR_WIDTH),
            text
        ),
        Err(err) => {
            let size = body
                .get("size")
                .and_then(Value::as_u64)
                .unwrap_or(err.as_bytes().len() as u64);
            format!(
                "File: {}\nNote: Binary file, cannot display content as text.\nSize: {} bytes",
                path, size
            )
        }
    };
    Ok(text)
}

/// Cut `text` to at most `max_chars` characters, noting how much was dropped.
fn truncate(text: String, max_chars: usize) -> String {
    if max_chars == 0 {
        return text;
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let dropped = text[cut..].chars().count();
            format!("{}\n... [truncated {} characters]", &text[..cut], dropped)
        }
        None => text,
    }
}
