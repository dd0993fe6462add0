//! Shared fixtures for the gateway integration tests.
//!
//! Each test binary wires a complete router over an in-memory SQLite
//! database and a substituted upstream, then drives it in-process with
//! `tower::ServiceExt::oneshot`. No sockets, no running daemon.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::response::Response;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use llamagate_axum::{GatewayContext, create_router};
use llamagate_core::ports::upstream::{
    ChatRequest, CreateModelRequest, DeleteRequest, GenerateRequest, PullRequest, PushRequest,
    ShowRequest, UpstreamError, UpstreamPort, UpstreamReply, UpstreamResult,
};
use llamagate_core::{
    AdminService, ApiKey, CredentialVerifier, MemorySessionStore, RequestLogRepository,
    TokenSigner, User,
};
use llamagate_db::TestDb;
use serde_json::{Value, json};

/// Signing secret shared by every test app, so tests can mint tokens
/// without going through the login endpoint first.
pub const TEST_SECRET: &str = "integration-test-signing-secret";

/// Upstream double that answers every operation with one canned reply and
/// records what was forwarded to it.
pub struct StubUpstream {
    body: Value,
    status: u16,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl StubUpstream {
    /// Stub that answers 200 with the given body.
    pub fn replying(body: Value) -> Arc<Self> {
        Self::replying_with_status(body, 200)
    }

    /// Stub that answers the given status with the given body.
    pub fn replying_with_status(body: Value, status: u16) -> Arc<Self> {
        Arc::new(Self {
            body,
            status,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Operations seen so far, with their serialized payloads.
    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, op: &'static str, payload: Value) -> UpstreamResult<UpstreamReply> {
        self.calls.lock().expect("calls lock").push((op, payload));
        Ok(UpstreamReply::new(self.body.clone(), self.status))
    }
}

#[async_trait]
impl UpstreamPort for StubUpstream {
    async fn list_models(&self) -> UpstreamResult<UpstreamReply> {
        self.record("list_models", Value::Null)
    }

    async fn generate(&self, req: &GenerateRequest) -> UpstreamResult<UpstreamReply> {
        self.record("generate", serde_json::to_value(req).expect("serialize"))
    }

    async fn chat(&self, req: &ChatRequest) -> UpstreamResult<UpstreamReply> {
        self.record("chat", serde_json::to_value(req).expect("serialize"))
    }

    async fn pull_model(&self, req: &PullRequest) -> UpstreamResult<UpstreamReply> {
        self.record("pull_model", serde_json::to_value(req).expect("serialize"))
    }

    async fn push_model(&self, req: &PushRequest) -> UpstreamResult<UpstreamReply> {
        self.record("push_model", serde_json::to_value(req).expect("serialize"))
    }

    async fn create_model(&self, req: &CreateModelRequest) -> UpstreamResult<UpstreamReply> {
        self.record("create_model", serde_json::to_value(req).expect("serialize"))
    }

    async fn delete_model(&self, req: &DeleteRequest) -> UpstreamResult<UpstreamReply> {
        self.record("delete_model", serde_json::to_value(req).expect("serialize"))
    }

    async fn show_model(&self, req: &ShowRequest) -> UpstreamResult<UpstreamReply> {
        self.record("show_model", serde_json::to_value(req).expect("serialize"))
    }
}

/// Upstream double whose daemon is unreachable. Every call fails the way a
/// refused connection does.
pub struct DownUpstream;

impl DownUpstream {
    fn refused(&self) -> UpstreamResult<UpstreamReply> {
        Err(UpstreamError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl UpstreamPort for DownUpstream {
    async fn list_models(&self) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn generate(&self, _req: &GenerateRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn chat(&self, _req: &ChatRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn pull_model(&self, _req: &PullRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn push_model(&self, _req: &PushRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn create_model(&self, _req: &CreateModelRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn delete_model(&self, _req: &DeleteRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }

    async fn show_model(&self, _req: &ShowRequest) -> UpstreamResult<UpstreamReply> {
        self.refused()
    }
}

/// A wired gateway over fresh storage, ready for `oneshot` calls.
pub struct TestApp {
    pub router: Router,
    pub db: TestDb,
    pub signer: TokenSigner,
}

impl TestApp {
    /// Wire a complete app around the given upstream.
    pub async fn with_upstream(upstream: Arc<dyn UpstreamPort>) -> Self {
        let db = TestDb::new().await.expect("in-memory database");
        let repos = db.repos();
        let signer = TokenSigner::new(TEST_SECRET, Duration::minutes(30));
        let ctx = GatewayContext {
            verifier: CredentialVerifier::new(
                repos.users.clone(),
                repos.api_keys.clone(),
                signer.clone(),
            ),
            admin: AdminService::new(repos.clone()),
            sessions: Arc::new(MemorySessionStore::new()),
            upstream,
            repos,
            session_ttl: Duration::seconds(3600),
        };
        Self {
            router: create_router(ctx),
            db,
            signer,
        }
    }

    /// Wire an app whose upstream answers everything with `{"ok": true}`.
    pub async fn spawn() -> Self {
        Self::with_upstream(StubUpstream::replying(json!({"ok": true}))).await
    }

    /// Provision an API key and hand back the stored row, secret included.
    pub async fn seed_key(&self, name: &str) -> ApiKey {
        AdminService::new(self.db.repos())
            .create_api_key(name)
            .await
            .expect("create api key")
    }

    /// Provision an operator account.
    pub async fn seed_user(&self, username: &str, password: &str) -> User {
        AdminService::new(self.db.repos())
            .create_user(username, password)
            .await
            .expect("create user")
    }

    /// Token carrying a username subject, as `/admin/token` mints it.
    pub fn user_token(&self, username: &str) -> String {
        self.signer
            .issue_for_user(username)
            .expect("sign user token")
    }

    /// Token carrying a `key:<id>` subject.
    pub fn key_token(&self, key_id: i64) -> String {
        self.signer.issue_for_key(key_id).expect("sign key token")
    }

    /// Usage rows written since the app came up.
    pub async fn log_count(&self) -> i64 {
        self.db
            .repos()
            .request_logs
            .count_since(Utc::now() - Duration::hours(1))
            .await
            .expect("count request logs")
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
