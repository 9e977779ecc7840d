//! Tool Registry - the closed set of tools and their typed invocations.
//!
//! [`ToolKind`] names every tool. Parsing raw call arguments yields a
//! [`ToolInvocation`] carrying that tool's typed parameters, so nothing past
//! this point handles untyped JSON.

use std::collections::HashMap;

use rmcp::model::{JsonObject, Tool};

use super::definitions::{
    CreateIssueParams, CreateIssueTool, FileContentParams, FileContentTool, ListUserReposParams,
    ListUserReposTool, RepositoryFilesParams, RepositoryFilesTool, SearchRepositoriesParams,
    SearchRepositoriesTool, ToolDefinition,
};
use super::error::ToolError;
use crate::domains::github::{GithubError, OutboundRequest, RenderHint, RequestBuilder};

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchRepositories,
    RepositoryFiles,
    FileContent,
    CreateIssue,
    ListUserRepos,
}

impl ToolKind {
    /// All tools, in advertised order.
    pub const ALL: [ToolKind; 5] = [
        Self::SearchRepositories,
        Self::RepositoryFiles,
        Self::FileContent,
        Self::CreateIssue,
        Self::ListUserRepos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SearchRepositories => SearchRepositoriesTool::NAME,
            Self::RepositoryFiles => RepositoryFilesTool::NAME,
            Self::FileContent => FileContentTool::NAME,
            Self::CreateIssue => CreateIssueTool::NAME,
            Self::ListUserRepos => ListUserReposTool::NAME,
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(self) -> Tool {
        match self {
            Self::SearchRepositories => SearchRepositoriesTool::to_tool(),
            Self::RepositoryFiles => RepositoryFilesTool::to_tool(),
            Self::FileContent => FileContentTool::to_tool(),
            Self::CreateIssue => CreateIssueTool::to_tool(),
            Self::ListUserRepos => ListUserReposTool::to_tool(),
        }
    }

    /// Deserialize and validate arguments for this tool.
    pub fn parse(self, arguments: JsonObject) -> Result<ToolInvocation, ToolError> {
        Ok(match self {
            Self::SearchRepositories => {
                ToolInvocation::SearchRepositories(SearchRepositoriesTool::parse(arguments)?)
            }
            Self::RepositoryFiles => {
                ToolInvocation::RepositoryFiles(RepositoryFilesTool::parse(arguments)?)
            }
            Self::FileContent => ToolInvocation::FileContent(FileContentTool::parse(arguments)?),
            Self::CreateIssue => ToolInvocation::CreateIssue(CreateIssueTool::parse(arguments)?),
            Self::ListUserRepos => {
                ToolInvocation::ListUserRepos(ListUserReposTool::parse(arguments)?)
            }
        })
    }
}

/// A tool call with validated, typed parameters.
#[derive(Debug, Clone)]
pub enum ToolInvocation {
    SearchRepositories(SearchRepositoriesParams),
    RepositoryFiles(RepositoryFilesParams),
    FileContent(FileContentParams),
    CreateIssue(CreateIssueParams),
    ListUserRepos(ListUserReposParams),
}

impl ToolInvocation {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::SearchRepositories(_) => ToolKind::SearchRepositories,
            Self::RepositoryFiles(_) => ToolKind::RepositoryFiles,
            Self::FileContent(_) => ToolKind::FileContent,
            Self::CreateIssue(_) => ToolKind::CreateIssue,
            Self::ListUserRepos(_) => ToolKind::ListUserRepos,
        }
    }

    pub fn build_request(&self, builder: &RequestBuilder) -> Result<OutboundRequest, GithubError> {
        match self {
            Self::SearchRepositories(p) => SearchRepositoriesTool::build_request(p, builder),
            Self::RepositoryFiles(p) => RepositoryFilesTool::build_request(p, builder),
            Self::FileContent(p) => FileContentTool::build_request(p, builder),
            Self::CreateIssue(p) => CreateIssueTool::build_request(p, builder),
            Self::ListUserRepos(p) => ListUserReposTool::build_request(p, builder),
        }
    }

    pub fn render_hint(&self) -> RenderHint {
        match self {
            Self::SearchRepositories(p) => SearchRepositoriesTool::render_hint(p),
            Self::RepositoryFiles(p) => RepositoryFilesTool::render_hint(p),
            Self::FileContent(p) => FileContentTool::render_hint(p),
            Self::CreateIssue(p) => CreateIssueTool::render_hint(p),
            Self::ListUserRepos(p) => ListUserReposTool::render_hint(p),
        }
    }
}

/// Tool registry - name lookup and metadata for all tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    by_name: HashMap<&'static str, ToolKind>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            by_name: ToolKind::ALL
                .into_iter()
                .map(|kind| (kind.name(), kind))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<ToolKind, ToolError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ToolError::unknown(name))
    }

    /// Get all tool names, in advertised order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        ToolKind::ALL.into_iter().map(ToolKind::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for `tools/list` on every transport.
    pub fn get_all_tools() -> Vec<Tool> {
        ToolKind::ALL.into_iter().map(ToolKind::to_tool).collect()
    }
}
