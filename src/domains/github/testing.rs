//! In-memory [`UpstreamClient`] for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::client::{UpstreamClient, UpstreamResult};
use super::context::GithubContext;
use super::error::GithubError;
use super::gateway::GithubGateway;
use super::request::OutboundRequest;
use crate::core::config::Config;

type Reply = Result<(u16, Value), GithubError>;

/// Records every request and answers from a queue of canned replies.
///
/// With an empty queue it answers `200 {}`.
#[derive(Default)]
pub struct RecordingUpstream {
    requests: Mutex<Vec<OutboundRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl RecordingUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful JSON reply.
    pub fn reply(self: &Arc<Self>, status: u16, body: Value) -> Arc<Self> {
        self.replies.lock().unwrap().push_back(Ok((status, body)));
        self.clone()
    }

    /// Queue a failure.
    pub fn fail(self: &Arc<Self>, err: GithubError) -> Arc<Self> {
        self.replies.lock().unwrap().push_back(Err(err));
        self.clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> OutboundRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was recorded")
    }
}

#[async_trait]
impl UpstreamClient for RecordingUpstream {
    async fn execute(&self, request: OutboundRequest) -> Result<UpstreamResult, GithubError> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok((200, Value::Object(Default::default()))));
        reply.map(|(status, body)| UpstreamResult::from_json(status, body))
    }
}

/// A context pointing at the default endpoint, optionally with a token.
pub fn test_context(token: Option<&str>) -> Arc<GithubContext> {
    let mut config = Config::default();
    config.credentials.github_token = token.map(str::to_string);
    Arc::new(GithubContext::from_config(&config))
}

/// Gateway over `upstream`, optionally with a token.
pub fn test_gateway(upstream: Arc<RecordingUpstream>, token: Option<&str>) -> Arc<GithubGateway> {
    Arc::new(GithubGateway::with_client(test_context(token), upstream))
}
