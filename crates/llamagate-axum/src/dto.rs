//! Request and response shapes for the admin API and the web forms.
//!
//! Domain types (`User`, `ApiKey`, `DashboardStats`) serialize directly as
//! their response views, so this module only carries the shapes that exist
//! purely on the wire.

use serde::{Deserialize, Serialize};

/// Username/password pair: the form body of `POST /admin/token` and
/// `POST /login`, and the JSON body of `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Key label: the JSON body of `POST /admin/api-keys` and the form body of
/// the dashboard's create-key form.
#[derive(Debug, Deserialize)]
pub struct KeyName {
    pub key_name: String,
}

/// Activation flag: the query of `PUT /admin/api-keys/{id}` and the JSON
/// body of the dashboard's toggle call.
#[derive(Debug, Deserialize)]
pub struct ActiveFlag {
    pub is_active: bool,
}

/// Pagination query for `GET /admin/api-keys`.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    100
}

/// Signed-token envelope returned by `POST /admin/token` and
/// `POST /admin/api-keys/{id}/token`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Success envelope for mutations that return no entity.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Flash banner carried back to a dashboard page after a form redirect.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub const fn healthy() -> Self {
        Self {
            status: "healthy",
            service: "llamagate",
        }
    }
}
