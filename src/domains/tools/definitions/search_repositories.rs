//! Repository search tool.
//!
//! Searches public repositories by keyword, best-starred first.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{ToolDefinition, default_search_limit, require_non_empty};
use crate::domains::github::{
    GithubError, OutboundRequest, RenderHint, RequestBuilder, clamp_per_page,
};
use crate::domains::tools::ToolError;

/// Parameters for repository search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchRepositoriesParams {
    /// GitHub search syntax is accepted as-is (e.g. `tokio language:rust`).
    #[schemars(description = "Search query for repositories")]
    pub query: String,

    #[schemars(
        description = "Maximum number of results (default: 10, max: 100)",
        range(max = 100)
    )]
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

/// Repository search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchRepositoriesTool;

impl ToolDefinition for SearchRepositoriesTool {
    const NAME: &'static str = "search_repositories";

    const DESCRIPTION: &'static str = "Search for GitHub repositories by keyword. Results are sorted by stars, highest first.";

    type Params = SearchRepositoriesParams;

    fn validate(params: &Self::Params) -> Result<(), ToolError> {
        require_non_empty("query", &params.query)
    }

    fn build_request(
        params: &Self::Params,
        builder: &RequestBuilder,
    ) -> Result<OutboundRequest, GithubError> {
        Ok(builder
            .get("/search/repositories")
            .query("q", &params.query)
            .query("per_page", clamp_per_page(params.limit))
            .query("sort", "stars")
            .query("order", "desc"))
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

    fn parse(args: serde_json::Value) -> Result<SearchRepositoriesParams, ToolError> {
        SearchRepositoriesTool::parse(args.as_object().cloned().unwrap())
    }

    #[test]
    fn test_default_limit() {
        let params = parse(json!({ "query": "tokio" })).unwrap();
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn test_request_shape() {
        let params = parse(json!({ "query": "mcp server", "limit": 150 })).unwrap();
        let builder = RequestBuilder::new(test_context(None));
        let request = SearchRepositoriesTool::build_request(&params, &builder).unwrap();

        assert_eq!(request.method, reqwest::Method::GET);
        assert_eq!(
            request.path_and_query(),
            "/search/repositories?q=mcp%20server&per_page=100&sort=stars&order=desc"
        );
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse(json!({})).is_err());
        assert!(parse(json!({ "query": "" })).is_err());
        assert!(parse(json!({ "query": "x", "limit": "10" })).is_err());
        assert!(parse(json!({ "query": "x", "limit": -1 })).is_err());
    }

    #[test]
    fn test_schema_advertises_limit_maximum() {
        let tool = SearchRepositoriesTool::to_tool();
        let schema = serde_json::to_value(&*tool.input_schema).unwrap();

        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["limit"]["maximum"], json!(100));
    }
}
