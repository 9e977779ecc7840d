//! Transports that carry MCP traffic to and from [`McpServer`](crate::core::McpServer).
//!
//! | feature | transport | notes |
//! |---|---|---|
//! | `stdio` (default) | rmcp over stdin/stdout | what desktop MCP clients spawn |
//! | `http` | JSON-RPC over `POST` (axum) | for curl, browsers and quick debugging |
//!
//! Which one runs is decided at startup from `MCP_TRANSPORT`.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
