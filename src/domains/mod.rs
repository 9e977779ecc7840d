//! Domains module containing business logic organized by bounded contexts.
//!
//! - `github` - Request building, HTTP execution and response rendering
//! - `tools` - Callable operations, each backed by one GitHub API call
//! - `resources` - Read-only `github://` documents

pub mod github;
pub mod resources;
pub mod tools;
