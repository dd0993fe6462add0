//! API key repository trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::{ActivityCounts, ApiKey, NewApiKey};

/// Repository for API key persistence operations.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// List keys in insertion order with offset pagination.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<ApiKey>, RepositoryError>;

    /// Get a key by database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the key doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<ApiKey, RepositoryError>;

    /// Get a key by its exact secret value.
    ///
    /// Returns `Err(RepositoryError::NotFound)` on no match. Active-state
    /// policy is the verifier's job; this is a plain lookup.
    async fn get_by_secret(&self, secret: &str) -> Result<ApiKey, RepositoryError>;

    /// Insert a new key.
    ///
    /// Returns the persisted key with its assigned ID.
    /// Returns `Err(RepositoryError::AlreadyExists)` on a duplicate secret.
    async fn insert(&self, key: &NewApiKey) -> Result<ApiKey, RepositoryError>;

    /// Flip the active flag, bumping `updated_at`.
    ///
    /// Returns the updated key, or `Err(RepositoryError::NotFound)`.
    async fn set_active(&self, id: i64, is_active: bool) -> Result<ApiKey, RepositoryError>;

    /// Delete a key. Request logs referencing it are kept.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the key doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Record a successful verification at `at`.
    async fn touch_last_used(&self, id: i64, at: DateTime<Utc>) -> Result<(), RepositoryError>;

    /// Total and active key counts for the dashboard.
    async fn counts(&self) -> Result<ActivityCounts, RepositoryError>;

    /// The most recently used keys, `last_used` descending.
    async fn recently_used(&self, limit: i64) -> Result<Vec<ApiKey>, RepositoryError>;
}
