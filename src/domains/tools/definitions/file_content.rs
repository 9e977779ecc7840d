//! File content tool.
//!
//! Fetches one file at a git ref and decodes it for display.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{
    ToolDefinition, default_ref, require_non_empty, require_relative_path, require_segment,
};
use crate::domains::github::{
    GithubError, OutboundRequest, RenderHint, RequestBuilder, contents_path,
};
use crate::domains::tools::ToolError;

/// Parameters for reading a file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileContentParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Path to the file inside the repository")]
    pub path: String,

    #[schemars(description = "Branch, tag or commit SHA (default: main)")]
    #[serde(default = "default_ref", rename = "ref")]
    pub git_ref: String,
}

/// File content tool implementation.
#[derive(Debug, Clone)]
pub struct FileContentTool;

impl ToolDefinition for FileContentTool {
    const NAME: &'static str = "get_file_content";

    const DESCRIPTION: &'static str = "Get the content of a file in a GitHub repository. Text files are decoded; binary files are reported by size.";

    type Params = FileContentParams;

    fn validate(params: &Self::Params) -> Result<(), ToolError> {
        require_segment("owner", &params.owner)?;
        require_segment("repo", &params.repo)?;
        require_non_empty("path", &params.path)?;
        require_relative_path("path", &params.path)
    }

    fn build_request(
        params: &Self::Params,
        builder: &RequestBuilder,
    ) -> Result<OutboundRequest, GithubError> {
        Ok(builder
            .get(contents_path(&params.owner, &params.repo, &params.path))
            .query("ref", &params.git_ref))
    }

    fn render_hint(params: &Self::Params) -> RenderHint {
        RenderHint::File {
            path: params.path.clone(),
        }
    }
}
