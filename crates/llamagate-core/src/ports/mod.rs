//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - Verification policy (active checks, uniform failures) lives in the
//!   services, not in the repositories

pub mod api_key_repository;
pub mod request_log_repository;
pub mod session_store;
pub mod upstream;
pub mod user_repository;

use std::sync::Arc;
use thiserror::Error;

// Re-export repository traits for convenience
pub use api_key_repository::ApiKeyRepository;
pub use request_log_repository::RequestLogRepository;
pub use session_store::SessionStore;
pub use upstream::{
    ChatRequest, ChatTurn, CreateModelRequest, DeleteRequest, GenerateRequest, PullRequest,
    PushRequest, ShowRequest, UpstreamError, UpstreamPort, UpstreamReply,
};
pub use user_repository::UserRepository;

/// Container for all repository trait objects.
///
/// Adapters are wired against this container so nothing couples to concrete
/// implementations. It lives in `llamagate-core` so the services can accept
/// it without depending on `llamagate-db`.
#[derive(Clone)]
pub struct Repos {
    /// User repository.
    pub users: Arc<dyn UserRepository>,
    /// API key repository.
    pub api_keys: Arc<dyn ApiKeyRepository>,
    /// Request log repository.
    pub request_logs: Arc<dyn RequestLogRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        users: Arc<dyn UserRepository>,
        api_keys: Arc<dyn ApiKeyRepository>,
        request_logs: Arc<dyn RequestLogRepository>,
    ) -> Self {
        Self {
            users,
            api_keys,
            request_logs,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// Abstracts away storage implementation details (e.g. sqlx errors) so
/// services handle storage failures through a stable surface.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same unique value already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A constraint was violated (e.g. foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// The canonical error type of the service layer. Adapters map this to
/// their own surfaces (HTTP status codes, CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Auth primitive failed (hashing or token encoding).
    #[error(transparent)]
    Auth(#[from] crate::auth::AuthError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
