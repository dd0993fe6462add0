//! Browser dashboard handlers.
//!
//! Pages authenticate with the `session_token` cookie. Unauthenticated page
//! loads and form posts bounce to `/login` with a 302; the JSON calls made
//! by page scripts answer a bare 401 instead, so the scripts can react.

use axum::Json;
use axum::body::Body;
use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use llamagate_core::Session;
use llamagate_core::auth::generate_session_token;

use crate::dto::{ActiveFlag, Credentials, FlashParams, KeyName, MessageResponse};
use crate::error::HttpError;
use crate::handlers::admin::key_not_found;
use crate::state::AppState;
use crate::views;

/// Cookie carrying the browser session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Pull the session token out of the `Cookie` header, if present.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Resolve the cookie to a live session, evicting expired ones.
async fn session_user(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = session_token(headers)?;
    state.sessions.get(&token).await
}

/// 302 with a `Location` header, the redirect form browsers follow for
/// both page loads and form posts.
fn found(location: &str) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::FOUND;
    let value =
        HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"));
    response.headers_mut().insert(header::LOCATION, value);
    response
}

fn session_cookie(token: &str, max_age_secs: i64) -> HeaderValue {
    // The token alphabet is URL-safe base64, so this cannot produce an
    // invalid header value.
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Max-Age={max_age_secs}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `GET /` - the dashboard, or a bounce to the login page.
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let Some(session) = session_user(&state, &headers).await else {
        return Ok(found("/login"));
    };
    let stats = state.admin.dashboard_stats().await?;
    let recent = state.admin.recent_activity().await?;
    Ok(Html(views::dashboard(&session.username, &stats, &recent)).into_response())
}

/// `GET /login` - the login form.
pub async fn login_page() -> Html<String> {
    Html(views::login_page(None))
}

/// `POST /login` - verify the form and open a session.
///
/// Failure re-renders the form with an inline error instead of redirecting,
/// so the browser keeps the typed username.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Response, HttpError> {
    let Some(user) = state
        .verifier
        .authenticate_user(&form.username, &form.password)
        .await?
    else {
        return Ok(Html(views::login_page(Some("Invalid username or password"))).into_response());
    };

    let token = generate_session_token();
    let session = Session::new(token.clone(), user.id, user.username, state.session_ttl);
    state.sessions.insert(session).await;

    let mut response = found("/");
    response.headers_mut().insert(
        header::SET_COOKIE,
        session_cookie(&token, state.session_ttl.num_seconds()),
    );
    Ok(response)
}

/// `GET /logout` - drop the session and expire the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token).await;
    }
    let mut response = found("/login");
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("session_token=; Path=/; HttpOnly; Max-Age=0"),
    );
    response
}

/// `GET /api-keys` - key management page.
pub async fn keys_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(flash): Query<FlashParams>,
) -> Result<Response, HttpError> {
    let Some(session) = session_user(&state, &headers).await else {
        return Ok(found("/login"));
    };
    let keys = state.admin.list_api_keys(0, 100).await?;
    Ok(Html(views::api_keys_page(&session.username, &keys, &flash)).into_response())
}

/// `POST /api-keys` - create-key form; bounces back with a flash message.
pub async fn create_key_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<KeyName>,
) -> Response {
    if session_user(&state, &headers).await.is_none() {
        return found("/login");
    }
    match state.admin.create_api_key(&form.key_name).await {
        Ok(_) => found("/api-keys?message=API key created successfully"),
        Err(err) => found(&format!("/api-keys?error={err}")),
    }
}

/// `PUT /api-keys/{id}` - toggle from the page script; JSON in, JSON out.
pub async fn toggle_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(flag): Json<ActiveFlag>,
) -> Result<Json<MessageResponse>, HttpError> {
    if session_user(&state, &headers).await.is_none() {
        return Err(HttpError::unauthorized("Unauthorized"));
    }
    state
        .admin
        .set_api_key_active(id, flag.is_active)
        .await
        .map_err(key_not_found)?;
    Ok(Json(MessageResponse {
        message: "API key updated successfully",
    }))
}

/// `DELETE /api-keys/{id}` - delete from the page script.
pub async fn delete_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    if session_user(&state, &headers).await.is_none() {
        return Err(HttpError::unauthorized("Unauthorized"));
    }
    state
        .admin
        .delete_api_key(id)
        .await
        .map_err(key_not_found)?;
    Ok(Json(MessageResponse {
        message: "API key deleted successfully",
    }))
}

/// `GET /users` - user management page.
pub async fn users_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(flash): Query<FlashParams>,
) -> Result<Response, HttpError> {
    let Some(session) = session_user(&state, &headers).await else {
        return Ok(found("/login"));
    };
    let users = state.admin.list_users().await?;
    Ok(Html(views::users_page(&session.username, &users, &flash)).into_response())
}

/// `POST /users` - create-user form; bounces back with a flash message.
pub async fn create_user_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<Credentials>,
) -> Response {
    if session_user(&state, &headers).await.is_none() {
        return found("/login");
    }
    match state.admin.create_user(&form.username, &form.password).await {
        Ok(_) => found("/users?message=User created successfully"),
        Err(err) => found(&format!("/users?error={err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=abc123; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());

        headers.remove(header::COOKIE);
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("/login");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[test]
    fn test_session_cookie_attributes() {
        let value = session_cookie("tok", 3600);
        let text = value.to_str().unwrap();
        assert!(text.starts_with("session_token=tok"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("Max-Age=3600"));
    }
}
