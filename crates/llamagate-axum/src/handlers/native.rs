//! Native-surface handlers: the daemon's own API, forwarded.
//!
//! Every handler follows the same sequence: record a usage row for the
//! admitted key, forward to the daemon, relay the daemon's body under the
//! daemon's status code. The usage row is written before the forward, so a
//! dead daemon still leaves an audit trail.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use llamagate_core::ports::{
    ChatRequest, CreateModelRequest, DeleteRequest, GenerateRequest, PullRequest, PushRequest,
    ShowRequest, UpstreamReply,
};

use crate::error::HttpError;
use crate::middleware::AuthedKey;
use crate::state::AppState;

/// Re-emit the daemon's body under the daemon's status code.
fn relay(reply: UpstreamReply) -> Result<Response, HttpError> {
    let status = StatusCode::from_u16(reply.status)
        .map_err(|_| HttpError::BadUpstream(format!("upstream status {}", reply.status)))?;
    Ok((status, Json(reply.body)).into_response())
}

/// `GET /api/tags` - list installed models.
pub async fn tags(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
) -> Result<Response, HttpError> {
    state.repos.request_logs.append(key.id, "/api/tags").await?;
    relay(state.upstream.list_models().await?)
}

/// `POST /api/generate` - text completion.
pub async fn generate(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<GenerateRequest>,
) -> Result<Response, HttpError> {
    state
        .repos
        .request_logs
        .append(key.id, "/api/generate")
        .await?;
    relay(state.upstream.generate(&req).await?)
}

/// `POST /api/chat` - chat completion.
pub async fn chat(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, HttpError> {
    state.repos.request_logs.append(key.id, "/api/chat").await?;
    relay(state.upstream.chat(&req).await?)
}

/// `POST /api/pull` - fetch a model from a registry.
pub async fn pull(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<PullRequest>,
) -> Result<Response, HttpError> {
    state.repos.request_logs.append(key.id, "/api/pull").await?;
    relay(state.upstream.pull_model(&req).await?)
}

/// `POST /api/push` - publish a model to a registry.
pub async fn push(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<PushRequest>,
) -> Result<Response, HttpError> {
    state.repos.request_logs.append(key.id, "/api/push").await?;
    relay(state.upstream.push_model(&req).await?)
}

/// `POST /api/create` - build a model from a modelfile.
pub async fn create(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<CreateModelRequest>,
) -> Result<Response, HttpError> {
    state
        .repos
        .request_logs
        .append(key.id, "/api/create")
        .await?;
    relay(state.upstream.create_model(&req).await?)
}

/// `DELETE /api/delete` - remove a model. The name travels in the body.
pub async fn delete(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<DeleteRequest>,
) -> Result<Response, HttpError> {
    state
        .repos
        .request_logs
        .append(key.id, "/api/delete")
        .await?;
    relay(state.upstream.delete_model(&req).await?)
}

/// `POST /api/show` - model details.
pub async fn show(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<ShowRequest>,
) -> Result<Response, HttpError> {
    state.repos.request_logs.append(key.id, "/api/show").await?;
    relay(state.upstream.show_model(&req).await?)
}
