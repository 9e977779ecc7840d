//! GitHub domain module.
//!
//! Everything that talks to the GitHub REST API lives here:
//!
//! - `context.rs` - Read-only settings shared by every component
//! - `request.rs` - Request builder (headers, credential, path/query encoding)
//! - `client.rs` - Upstream client trait and its reqwest implementation
//! - `normalize.rs` - Response normalizer and the response envelope
//! - `gateway.rs` - The build → execute → normalize pipeline
//! - `error.rs` - Upstream error types

mod client;
mod context;
mod error;
mod gateway;
mod normalize;
mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpUpstream, UpstreamClient, UpstreamResult};
pub use context::GithubContext;
pub use error::GithubError;
pub use gateway::GithubGateway;
pub use normalize::{Normalizer, RenderHint, ResponseEnvelope};
pub use request::{
    GITHUB_ACCEPT, GITHUB_API_VERSION, MAX_PER_PAGE, OutboundRequest, RequestBuilder,
    clamp_per_page, contents_path, encode_component, has_dot_segment, is_dot_segment, repo_path,
};
