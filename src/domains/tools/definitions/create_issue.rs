//! Issue creation tool. The only tool that writes upstream.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::common::{ToolDefinition, require_non_empty, require_segment};
use crate::domains::github::{GithubError, OutboundRequest, RequestBuilder, repo_path};
use crate::domains::tools::ToolError;

/// Parameters for opening an issue.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Issue title")]
    pub title: String,

    #[schemars(description = "Issue body (Markdown)")]
    #[serde(default)]
    pub body: String,

    #[schemars(description = "Labels to apply to the issue")]
    #[serde(default)]
    pub labels: Vec<String>,
}

impl CreateIssueParams {
    /// JSON payload for the issues endpoint. `labels` is omitted when empty.
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "title": self.title,
            "body": self.body,
        });
        if !self.labels.is_empty() {
            payload["labels"] = json!(self.labels);
        }
        payload
    }
}

/// Issue creation tool implementation.
#[derive(Debug, Clone)]
pub struct CreateIssueTool;

impl ToolDefinition for CreateIssueTool {
    const NAME: &'static str = "create_issue";

    const DESCRIPTION: &'static str =
        "Create a new issue in a GitHub repository. Requires a configured GitHub token.";

    type Params = CreateIssueParams;

    fn validate(params: &Self::Params) -> Result<(), ToolError> {
        require_segment("owner", &params.owner)?;
        require_segment("repo", &params.repo)?;
        require_non_empty("title", &params.title)
    }

    fn build_request(
        params: &Self::Params,
        builder: &RequestBuilder,
    ) -> Result<OutboundRequest, GithubError> {
        builder.require_auth("creating issues")?;
        let path = format!("{}/issues", repo_path(&params.owner, &params.repo));
        Ok(builder.post(path, params.payload()))
    }
}
