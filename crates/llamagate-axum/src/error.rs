//! HTTP error type and mappings.
//!
//! Every failure leaving a handler is converted into an [`HttpError`] and
//! rendered as a `{"error": ..., "status": ...}` JSON body.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use llamagate_core::{CoreError, RepositoryError, UpstreamError};
use serde::Serialize;
use thiserror::Error;

/// Gateway-level HTTP error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Missing, invalid or inactive credential.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        /// `WWW-Authenticate` scheme to advertise, when the surface uses one.
        challenge: Option<&'static str>,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input, duplicate resource).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream daemon unreachable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream daemon answered with something unparseable.
    #[error("Bad upstream response: {0}")]
    BadUpstream(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    /// 401 without a `WWW-Authenticate` header (web JSON endpoints).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::Unauthorized {
            message: message.into(),
            challenge: None,
        }
    }

    /// 401 advertising the credential scheme the route expects.
    pub fn challenge(message: impl Into<String>, scheme: &'static str) -> Self {
        HttpError::Unauthorized {
            message: message.into(),
            challenge: Some(scheme),
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, challenge) = match self {
            HttpError::Unauthorized { message, challenge } => {
                (StatusCode::UNAUTHORIZED, message, challenge)
            }
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            HttpError::BadUpstream(msg) | HttpError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(scheme) = challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(scheme));
        }
        response
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Auth(auth_err) => HttpError::Internal(auth_err.to_string()),
            CoreError::Validation(msg) => HttpError::BadRequest(msg),
            CoreError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => HttpError::NotFound(msg),
            // Duplicate creations answer 400, which is what existing
            // clients of the admin API expect.
            RepositoryError::AlreadyExists(msg) => HttpError::BadRequest(msg),
            RepositoryError::Storage(msg) => HttpError::Internal(format!("Storage: {msg}")),
            RepositoryError::Constraint(msg) => HttpError::BadRequest(msg),
        }
    }
}

impl From<UpstreamError> for HttpError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unavailable(msg) => {
                HttpError::ServiceUnavailable(format!("Ollama service unavailable: {msg}"))
            }
            UpstreamError::Protocol(msg) => {
                HttpError::BadUpstream(format!("Invalid response from Ollama: {msg}"))
            }
        }
    }
}
