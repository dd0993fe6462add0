//! OpenAI-compatible handlers.
//!
//! Same log-then-forward sequence as the native surface, with the dialect
//! translation from `llamagate-proxy` applied on both sides. The daemon's
//! status code is not consulted here: a body that parsed is translated and
//! answered as 200.

use axum::Json;
use axum::extract::{Extension, State};
use llamagate_proxy::models::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
    ModelsResponse,
};
use llamagate_proxy::openai;

use crate::error::HttpError;
use crate::middleware::AuthedKey;
use crate::state::AppState;

/// `GET /v1/models` - installed models in OpenAI list form.
pub async fn models(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
) -> Result<Json<ModelsResponse>, HttpError> {
    state.repos.request_logs.append(key.id, "/v1/models").await?;
    let reply = state.upstream.list_models().await?;
    Ok(Json(openai::models_response(&reply.body)))
}

/// `POST /v1/completions` - text completion in OpenAI form.
pub async fn completions(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, HttpError> {
    state
        .repos
        .request_logs
        .append(key.id, "/v1/completions")
        .await?;
    let model = req.model.clone();
    let reply = state.upstream.generate(&openai::completion_request(req)).await?;
    Ok(Json(openai::completion_response(&model, &reply.body)))
}

/// `POST /v1/chat/completions` - chat completion in OpenAI form.
pub async fn chat_completions(
    State(state): State<AppState>,
    Extension(AuthedKey(key)): Extension<AuthedKey>,
    Json(req): Json<ChatCompletionRequest>,
) -> Result<Json<ChatCompletionResponse>, HttpError> {
    state
        .repos
        .request_logs
        .append(key.id, "/v1/chat/completions")
        .await?;
    let model = req.model.clone();
    let reply = state.upstream.chat(&openai::chat_request(req)).await?;
    Ok(Json(openai::chat_response(&model, &reply.body)))
}
