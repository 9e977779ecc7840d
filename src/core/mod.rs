//! Infrastructure shared by every domain.
//!
//! - `config` - environment-driven settings, validated once at startup
//! - `error` - the crate-wide [`Error`]
//! - `server` - the rmcp [`ServerHandler`](rmcp::ServerHandler) wiring tools and resources
//! - `transport` - stdio and HTTP serving

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
