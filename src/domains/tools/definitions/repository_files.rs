//! Repository directory listing tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{ToolDefinition, require_relative_path, require_segment};
use crate::domains::github::{
    GithubError, OutboundRequest, RenderHint, RequestBuilder, contents_path,
};
use crate::domains::tools::ToolError;

/// Parameters for listing a repository directory.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryFilesParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    /// Empty means the repository root.
    #[schemars(description = "Directory path inside the repository (default: root)")]
    #[serde(default)]
    pub path: String,
}

/// Repository directory listing tool implementation.
#[derive(Debug, Clone)]
pub struct RepositoryFilesTool;

impl ToolDefinition for RepositoryFilesTool {
    const NAME: &'static str = "get_repository_files";

    const DESCRIPTION: &'static str =
        "List files and directories at a path in a GitHub repository (the root when no path is given).";

    type Params = RepositoryFilesParams;

    fn validate(params: &Self::Params) -> Result<(), ToolError> {
        require_segment("owner", &params.owner)?;
        require_segment("repo", &params.repo)?;
        require_relative_path("path", &params.path)
    }

    fn build_request(
        params: &Self::Params,
        builder: &RequestBuilder,
    ) -> Result<OutboundRequest, GithubError> {
        Ok(builder.get(contents_path(&params.owner, &params.repo, &params.path)))
    }

    fn render_hint(_params: &Self::Params) -> RenderHint {
        RenderHint::Listing { noun: "Entries" }
    }
}
