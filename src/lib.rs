//! GitHub MCP Server Library
//!
//! This crate exposes a fixed set of GitHub operations to Model Context
//! Protocol (MCP) clients: five tools and four `github://` resource classes,
//! all backed by the GitHub REST API.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **github**: Request building, HTTP execution and response rendering
//!   - **tools**: Typed tool definitions and the dispatcher
//!   - **resources**: Resource classes, URI resolution and reads
//!
//! # Example
//!
//! ```rust,no_run
//! use github_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
