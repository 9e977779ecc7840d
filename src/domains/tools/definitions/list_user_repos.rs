//! Authenticated user's repository listing tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{ToolDefinition, default_per_page};
use crate::domains::github::{
    GithubError, OutboundRequest, RenderHint, RequestBuilder, clamp_per_page,
};

/// Which repositories of the account to include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RepoType {
    #[default]
    All,
    Owner,
    Public,
    Private,
    Member,
}

impl RepoType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owner => "owner",
            Self::Public => "public",
            Self::Private => "private",
            Self::Member => "member",
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RepoSort {
    Created,
    #[default]
    Updated,
    Pushed,
    FullName,
}

impl RepoSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Pushed => "pushed",
            Self::FullName => "full_name",
        }
    }
}

/// Parameters for listing the account's repositories.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListUserReposParams {
    #[schemars(description = "Type of repositories to list (default: all)")]
    #[serde(default, rename = "type")]
    pub repo_type: RepoType,

    #[schemars(description = "Sort order (default: updated)")]
    #[serde(default)]
    pub sort: RepoSort,

    #[schemars(
        description = "Number of repositories per page (default: 30, max: 100)",
        range(max = 100)
    )]
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// User repository listing tool implementation.
#[derive(Debug, Clone)]
pub struct ListUserReposTool;

impl ToolDefinition for ListUserReposTool {
    const NAME: &'static str = "list_user_repos";

    const DESCRIPTION: &'static str = "List repositories of the authenticated GitHub user.";

    type Params = ListUserReposParams;

    fn build_request(
        params: &Self::Params,
        builder: &RequestBuilder,
    ) -> Result<OutboundRequest, GithubError> {
        Ok(builder
            .get("/user/repos")
            .query("type", params.repo_type.as_str())
            .query("sort", params.sort.as_str())
            .query("per_page", clamp_per_page(params.per_page)))
    }

    fn render_hint(_params: &Self::Params) -> RenderHint {
        RenderHint::Listing {
            noun: "Repositories",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::github::testing::test_context;
    use serde_json::json;

    fn request_for(args: serde_json::Value) -> OutboundRequest {
        let params = ListUserReposTool::parse(args.as_object().cloned().unwrap()).unwrap();
        ListUserReposTool::build_request(&params, &RequestBuilder::new(test_context(None)))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let request = request_for(json!({}));
        assert_eq!(
            request.path_and_query(),
            "/user/repos?type=all&sort=updated&per_page=30"
        );
    }

    #[test]
    fn test_per_page_clamped() {
        let request = request_for(json!({ "type": "owner", "sort": "full_name", "per_page": 150 }));
        assert_eq!(request.query_param("type"), Some("owner"));
        assert_eq!(request.query_param("sort"), Some("full_name"));
        assert_eq!(request.query_param("per_page"), Some("100"));
    }

    #[test]
    fn test_rejects_unknown_enum_value() {
        let args = json!({ "type": "forks" });
        assert!(ListUserReposTool::parse(args.as_object().cloned().unwrap()).is_err());
    }

    #[test]
    fn test_schema_lists_enum_values() {
        let schema = serde_json::to_string(&*ListUserReposTool::to_tool().input_schema).unwrap();
        for value in ["all", "owner", "public", "private", "member", "full_name", "pushed"] {
            assert!(schema.contains(&format!("\"{}\"", value)), "missing {value}");
        }
        assert!(schema.contains("\"maximum\":100"));
    }
}
