//! Admin API handlers: token issue, user creation, key management.

use axum::extract::{Form, Path, Query, State};
use axum::Json;
use llamagate_core::{ApiKey, CoreError, RepositoryError, User};

use crate::dto::{ActiveFlag, Credentials, KeyName, MessageResponse, PageParams, TokenResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// Rewrite a missing-key repository error into the wire message clients
/// key on; everything else maps as usual.
pub(crate) fn key_not_found(err: CoreError) -> HttpError {
    match err {
        CoreError::Repository(RepositoryError::NotFound(_)) => {
            HttpError::NotFound("API key not found".into())
        }
        other => other.into(),
    }
}

/// `POST /admin/token` - exchange a username/password form for a token.
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Json<TokenResponse>, HttpError> {
    let Some(user) = state
        .verifier
        .authenticate_user(&form.username, &form.password)
        .await?
    else {
        return Err(HttpError::challenge(
            "Incorrect username or password",
            "Bearer",
        ));
    };
    let access_token = state.verifier.create_access_token(&user)?;
    Ok(Json(TokenResponse::bearer(access_token)))
}

/// `POST /admin/users` - create an operator account.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<User>, HttpError> {
    match state.admin.create_user(&body.username, &body.password).await {
        Ok(user) => Ok(Json(user)),
        Err(CoreError::Repository(RepositoryError::AlreadyExists(_))) => {
            Err(HttpError::BadRequest("Username already registered".into()))
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /admin/api-keys` - paginated key listing, secrets included.
pub async fn list_keys(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<ApiKey>>, HttpError> {
    Ok(Json(state.admin.list_api_keys(page.skip, page.limit).await?))
}

/// `POST /admin/api-keys` - create a key. The response is the only place
/// the generated secret is handed out.
pub async fn create_key(
    State(state): State<AppState>,
    Json(body): Json<KeyName>,
) -> Result<Json<ApiKey>, HttpError> {
    Ok(Json(state.admin.create_api_key(&body.key_name).await?))
}

/// `PUT /admin/api-keys/{id}` - toggle via the `is_active` query parameter.
pub async fn toggle_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(flag): Query<ActiveFlag>,
) -> Result<Json<MessageResponse>, HttpError> {
    state
        .admin
        .set_api_key_active(id, flag.is_active)
        .await
        .map_err(key_not_found)?;
    Ok(Json(MessageResponse {
        message: "API key updated successfully",
    }))
}

/// `DELETE /admin/api-keys/{id}` - delete a key, keeping its usage rows.
pub async fn delete_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    state
        .admin
        .delete_api_key(id)
        .await
        .map_err(key_not_found)?;
    Ok(Json(MessageResponse {
        message: "API key deleted successfully",
    }))
}

/// `POST /admin/api-keys/{id}/token` - mint a key-scoped signed token.
pub async fn key_token(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TokenResponse>, HttpError> {
    let Some(token) = state.verifier.create_key_token(id).await? else {
        return Err(HttpError::NotFound("API key not found".into()));
    };
    Ok(Json(TokenResponse::bearer(token)))
}
