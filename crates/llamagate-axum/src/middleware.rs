//! Credential middleware for the protected API surfaces.
//!
//! Each surface checks credentials before any handler runs and stashes the
//! admitted identity as a request extension. Web-page sessions are resolved
//! inside the web handlers instead, because those answer with redirects
//! rather than 401s.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use llamagate_core::{ApiKey, User};
use tracing::warn;

use crate::error::HttpError;
use crate::state::AppState;

/// Header carrying a raw API key secret on the native surface.
pub const X_API_KEY: &str = "x-api-key";

/// The API key admitted for this request.
#[derive(Debug, Clone)]
pub struct AuthedKey(pub ApiKey);

/// The operator admitted for this admin request.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn bearer_value(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

/// `/api/*`: admit an `X-API-Key` secret or a bearer credential.
///
/// `X-API-Key` wins when both are present. A bearer value may be either a
/// raw key secret or a key-scoped signed token.
pub async fn require_api_credential(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let header_secret = request
        .headers()
        .get(X_API_KEY)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let key = if let Some(secret) = header_secret {
        match state.verifier.verify_api_key(&secret).await? {
            Some(key) => key,
            None => {
                warn!(path = %request.uri().path(), "rejected request: invalid API key");
                return Err(HttpError::challenge("Invalid API key", "ApiKey"));
            }
        }
    } else if let Some(token) = bearer_value(&request) {
        match state.verifier.verify_bearer_token(&token).await? {
            Some(key) => key,
            None => {
                warn!(path = %request.uri().path(), "rejected request: invalid bearer credential");
                return Err(HttpError::challenge("Invalid Bearer token", "Bearer"));
            }
        }
    } else {
        warn!(path = %request.uri().path(), "rejected request: no credential presented");
        return Err(HttpError::challenge("API key required", "ApiKey"));
    };

    request.extensions_mut().insert(AuthedKey(key));
    Ok(next.run(request).await)
}

/// `/v1/*`: admit a bearer credential only.
pub async fn require_bearer_credential(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let Some(token) = bearer_value(&request) else {
        warn!(path = %request.uri().path(), "rejected request: no bearer credential");
        return Err(HttpError::challenge("Bearer token required", "Bearer"));
    };
    let Some(key) = state.verifier.verify_bearer_token(&token).await? else {
        warn!(path = %request.uri().path(), "rejected request: invalid bearer credential");
        return Err(HttpError::challenge("Invalid Bearer token", "Bearer"));
    };

    request.extensions_mut().insert(AuthedKey(key));
    Ok(next.run(request).await)
}

/// `/admin/*` (minus the token endpoint): admit an operator token.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let Some(token) = bearer_value(&request) else {
        return Err(HttpError::challenge("Not authenticated", "Bearer"));
    };
    let Some(user) = state.verifier.current_user(&token).await? else {
        warn!(path = %request.uri().path(), "rejected admin request: invalid operator token");
        return Err(HttpError::challenge("Could not validate credentials", "Bearer"));
    };

    request.extensions_mut().insert(AdminUser(user));
    Ok(next.run(request).await)
}
