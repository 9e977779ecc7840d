//! Tools domain module.
//!
//! Tools are the callable operations exposed to MCP clients. Each one maps
//! typed arguments onto exactly one GitHub API call.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Closed tool set, typed invocations, name lookup
//! - `dispatcher.rs` - lookup → parse → build → execute → normalize
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolDefinition`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a `ToolKind` and `ToolInvocation` variant in `registry.rs`
//!
//! **No need to modify `server.rs`!** Listing and dispatch go through the registry.

pub mod definitions;
mod dispatcher;
mod error;
mod registry;

pub use dispatcher::ToolDispatcher;
pub use error::ToolError;
pub use registry::{ToolInvocation, ToolKind, ToolRegistry};
