//! Upstream daemon port trait.

use async_trait::async_trait;
use serde_json::Value;

use super::error::UpstreamResult;
use super::types::{
    ChatRequest, CreateModelRequest, DeleteRequest, GenerateRequest, PullRequest, PushRequest,
    ShowRequest,
};

/// Parsed body plus upstream status code, relayed as-is to the caller.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    /// The daemon's JSON body.
    pub body: Value,
    /// The daemon's HTTP status code.
    pub status: u16,
}

impl UpstreamReply {
    #[must_use]
    pub const fn new(body: Value, status: u16) -> Self {
        Self { body, status }
    }
}

/// Port trait for the model-serving daemon, one method per operation.
///
/// # Design
///
/// - Stateless: safe for concurrent reuse across requests
/// - No retries, no caching; each call is a single best-effort forward
/// - Network failure maps to `UpstreamError::Unavailable`, an unparseable
///   body to `UpstreamError::Protocol`; daemon-level errors (such as an
///   unknown model) come back as an `UpstreamReply` with the daemon's own
///   status code
#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// `GET /api/tags` - list installed models.
    async fn list_models(&self) -> UpstreamResult<UpstreamReply>;

    /// `POST /api/generate` - text completion.
    async fn generate(&self, req: &GenerateRequest) -> UpstreamResult<UpstreamReply>;

    /// `POST /api/chat` - chat completion.
    async fn chat(&self, req: &ChatRequest) -> UpstreamResult<UpstreamReply>;

    /// `POST /api/pull` - fetch a model from a registry.
    async fn pull_model(&self, req: &PullRequest) -> UpstreamResult<UpstreamReply>;

    /// `POST /api/push` - publish a model to a registry.
    async fn push_model(&self, req: &PushRequest) -> UpstreamResult<UpstreamReply>;

    /// `POST /api/create` - build a model from a modelfile.
    async fn create_model(&self, req: &CreateModelRequest) -> UpstreamResult<UpstreamReply>;

    /// `DELETE /api/delete` - remove a model. The name travels in the body.
    async fn delete_model(&self, req: &DeleteRequest) -> UpstreamResult<UpstreamReply>;

    /// `POST /api/show` - model details.
    async fn show_model(&self, req: &ShowRequest) -> UpstreamResult<UpstreamReply>;
}
