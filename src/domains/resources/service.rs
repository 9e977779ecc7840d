//! Resource service implementation.
//!
//! The ResourceService lists the declared resource classes and serves reads:
//! URI → descriptor → request → upstream call → rendered envelope.
//!
//! Resource classes are declared in `registry.rs`. Adding a new class does
//! NOT require modifying this file beyond its request mapping.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{debug, info, instrument, warn};

use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use super::resolver::resolve;
use crate::domains::github::{GithubGateway, ResponseEnvelope};

/// Service for listing and reading GitHub-backed resources.
pub struct ResourceService {
    gateway: Arc<GithubGateway>,

    /// Concrete resources, in declaration order.
    resources: Vec<Resource>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

impl ResourceService {
    /// Create a new ResourceService over the given gateway.
    pub fn new(gateway: Arc<GithubGateway>) -> Self {
        info!("Initializing ResourceService");
        Self {
            gateway,
            resources: get_all_resources(),
            templates: get_all_resource_templates(),
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Resolve and fetch a resource. Unknown URIs fail before any network call.
    pub async fn read(&self, uri: &str) -> Result<ResponseEnvelope, ResourceError> {
        let descriptor = resolve(uri)?;
        debug!(phase = "building", kind = descriptor.kind.as_str());
        let request = self.gateway.builder().for_resource(&descriptor);
        Ok(self
            .gateway
            .fetch(request, &descriptor.render_hint())
            .await?)
    }

    /// Read a resource, rendering any failure into the returned text.
    #[instrument(skip(self))]
    pub async fn read_resource(&self, uri: &str) -> ReadResourceResult {
        let envelope = match self.read(uri).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Error reading resource {}: {}", uri, e);
                ResponseEnvelope::error(e)
            }
        };

        ReadResourceResult {
            contents: vec![ResourceContents::text(envelope.into_text(), uri)],
        }
    }
}
