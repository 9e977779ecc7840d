//! The build → execute → normalize pipeline shared by tools and resources.

use std::sync::Arc;

use tracing::debug;

use super::client::{HttpUpstream, UpstreamClient};
use super::context::GithubContext;
use super::error::GithubError;
use super::normalize::{Normalizer, RenderHint, ResponseEnvelope};
use super::request::{OutboundRequest, RequestBuilder};

/// Owns one instance of each GitHub component for the lifetime of the server.
#[derive(Clone)]
pub struct GithubGateway {
    ctx: Arc<GithubContext>,
    builder: RequestBuilder,
    client: Arc<dyn UpstreamClient>,
    normalizer: Normalizer,
}

impl GithubGateway {
    /// Gateway over the real HTTP client.
    pub fn new(ctx: Arc<GithubContext>) -> Result<Self, GithubError> {
        let client = Arc::new(HttpUpstream::new(ctx.clone())?);
        Ok(Self::with_client(ctx, client))
    }

    /// Gateway over any [`UpstreamClient`].
    pub fn with_client(ctx: Arc<GithubContext>, client: Arc<dyn UpstreamClient>) -> Self {
        Self {
            builder: RequestBuilder::new(ctx.clone()),
            normalizer: Normalizer::new(ctx.clone()),
            ctx,
            client,
        }
    }

    pub fn context(&self) -> &GithubContext {
        &self.ctx
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Execute a built request and render its payload.
    pub async fn fetch(
        &self,
        request: OutboundRequest,
        hint: &RenderHint,
    ) -> Result<ResponseEnvelope, GithubError> {
        debug!(phase = "executing", path = %request.path);
        let result = self.client.execute(request).await?;
        debug!(phase = "normalizing", status = result.status);
        self.normalizer.normalize(result, hint)
    }
}
