//! Failures while bringing up or serving a transport.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The listening socket could not be opened.
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake or service setup failed.
    #[error("transport startup failed: {0}")]
    Startup(String),

    /// The transport stopped with an error after it was running.
    #[error("transport stopped unexpectedly: {0}")]
    Serve(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn startup(err: impl std::fmt::Display) -> Self {
        Self::Startup(err.to_string())
    }

    pub fn serve(err: impl std::fmt::Display) -> Self {
        Self::Serve(err.to_string())
    }
}
