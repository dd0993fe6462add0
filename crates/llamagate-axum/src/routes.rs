//! Route definitions and router construction.
//!
//! Four surfaces share one router: the native daemon API under `/api`, the
//! OpenAI-compatible API under `/v1`, the admin API under `/admin`, and the
//! browser pages at the root. Each protected surface gets its own
//! credential middleware; `/health` and the login flow stay open.

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::GatewayContext;
use crate::dto::HealthResponse;
use crate::handlers::{admin, native, openai, web};
use crate::middleware::{require_admin, require_api_credential, require_bearer_credential};
use crate::state::AppState;

fn native_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/tags", get(native::tags))
        .route("/generate", post(native::generate))
        .route("/chat", post(native::chat))
        .route("/pull", post(native::pull))
        .route("/push", post(native::push))
        .route("/create", post(native::create))
        .route("/delete", delete(native::delete))
        .route("/show", post(native::show))
        .route_layer(from_fn_with_state(state, require_api_credential))
}

fn openai_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/models", get(openai::models))
        .route("/completions", post(openai::completions))
        .route("/chat/completions", post(openai::chat_completions))
        .route_layer(from_fn_with_state(state, require_bearer_credential))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    // The token endpoint is how credentials are obtained, so it sits
    // outside the guard.
    let guarded = Router::new()
        .route("/users", post(admin::create_user))
        .route("/api-keys", get(admin::list_keys).post(admin::create_key))
        .route(
            "/api-keys/{id}",
            put(admin::toggle_key).delete(admin::delete_key),
        )
        .route("/api-keys/{id}/token", post(admin::key_token))
        .route_layer(from_fn_with_state(state, require_admin));

    Router::new().route("/token", post(admin::token)).merge(guarded)
}

fn web_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(web::dashboard))
        .route("/login", get(web::login_page).post(web::login))
        .route("/logout", get(web::logout))
        .route("/api-keys", get(web::keys_page).post(web::create_key_form))
        .route(
            "/api-keys/{id}",
            put(web::toggle_key).delete(web::delete_key),
        )
        .route("/users", get(web::users_page).post(web::create_user_form))
}

/// Build the complete gateway router.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`
pub fn create_router(ctx: GatewayContext) -> Router {
    let state: AppState = Arc::new(ctx);

    // Browser callers of the OpenAI surface arrive from arbitrary origins;
    // credentials are checked per request, so CORS stays wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api", native_routes(state.clone()))
        .nest("/v1", openai_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()))
        .merge(web_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe, unauthenticated.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
