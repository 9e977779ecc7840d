//! Tool definitions module.
//!
//! Each tool is defined in its own file and implements [`ToolDefinition`].

pub mod common;
pub mod create_issue;
pub mod file_content;
pub mod list_user_repos;
pub mod repository_files;
pub mod search_repositories;

pub use common::ToolDefinition;
pub use create_issue::{CreateIssueParams, CreateIssueTool};
pub use file_content::{FileContentParams, FileContentTool};
pub use list_user_repos::{ListUserReposParams, ListUserReposTool, RepoSort, RepoType};
pub use repository_files::{RepositoryFilesParams, RepositoryFilesTool};
pub use search_repositories::{SearchRepositoriesParams, SearchRepositoriesTool};
