//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, builds the GitHub-backed server
//! and runs it on the configured transport.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use github_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level, config.logging.with_timestamps);
    config.log_warnings();

    config.validate().context("invalid configuration")?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    info!("Transport: {}", transport.config().description());
    let server = McpServer::new(config).context("failed to build MCP server")?;

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `MCP_LOG_LEVEL` when set. Output goes to stderr:
/// on the stdio transport, stdout carries protocol messages only.
fn init_logging(level: &str, with_timestamps: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if with_timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
