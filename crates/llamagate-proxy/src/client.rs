//! HTTP client for the upstream model daemon.
//!
//! Implements `UpstreamPort` over `reqwest`. One round-trip per call, no
//! retries; transport failures and unparseable bodies map onto the two
//! `UpstreamError` variants, everything else is relayed untouched.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use llamagate_core::ports::upstream::{
    ChatRequest, CreateModelRequest, DeleteRequest, GenerateRequest, PullRequest, PushRequest,
    ShowRequest, UpstreamError, UpstreamPort, UpstreamReply, UpstreamResult,
};

/// `reqwest`-backed implementation of [`UpstreamPort`].
///
/// Holds one connection-pooling client; cheap to clone and safe to share
/// across requests.
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the daemon at `base_url` with a per-request
    /// deadline covering connect, write, and read.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> UpstreamResult<UpstreamReply> {
        debug!(path, "forwarding GET to upstream");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        read_reply(response).await
    }

    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> UpstreamResult<UpstreamReply> {
        debug!(path, "forwarding POST to upstream");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        read_reply(response).await
    }

    async fn delete<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> UpstreamResult<UpstreamReply> {
        debug!(path, "forwarding DELETE to upstream");
        let response = self
            .http
            .delete(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        read_reply(response).await
    }
}

/// Read the body and parse it as JSON, keeping the daemon's status code.
async fn read_reply(response: reqwest::Response) -> UpstreamResult<UpstreamReply> {
    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

    let body = serde_json::from_slice(&bytes)
        .map_err(|e| UpstreamError::Protocol(format!("invalid JSON from upstream: {e}")))?;

    Ok(UpstreamReply::new(body, status))
}

#[async_trait]
impl UpstreamPort for OllamaClient {
    async fn list_models(&self) -> UpstreamResult<UpstreamReply> {
        self.get("/api/tags").await
    }

    async fn generate(&self, req: &GenerateRequest) -> UpstreamResult<UpstreamReply> {
        self.post("/api/generate", req).await
    }

    async fn chat(&self, req: &ChatRequest) -> UpstreamResult<UpstreamReply> {
        self.post("/api/chat", req).await
    }

    async fn pull_model(&self, req: &PullRequest) -> UpstreamResult<UpstreamReply> {
        self.post("/api/pull", req).await
    }

    async fn push_model(&self, req: &PushRequest) -> UpstreamResult<UpstreamReply> {
        self.post("/api/push", req).await
    }

    async fn create_model(&self, req: &CreateModelRequest) -> UpstreamResult<UpstreamReply> {
        self.post("/api/create", req).await
    }

    async fn delete_model(&self, req: &DeleteRequest) -> UpstreamResult<UpstreamReply> {
        self.delete("/api/delete", req).await
    }

    async fn show_model(&self, req: &ShowRequest) -> UpstreamResult<UpstreamReply> {
        self.post("/api/show", req).await
    }
}
