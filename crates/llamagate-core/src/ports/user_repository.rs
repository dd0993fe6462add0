//! User repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{ActivityCounts, NewUser, User};

/// Repository for user persistence operations.
///
/// Users are never physically deleted in the current scope; deactivation
/// flips `is_active` and keeps the row.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users, oldest first.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Get a user by database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the user doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError>;

    /// Get a user by login name.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no user has that name.
    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError>;

    /// Insert a new user.
    ///
    /// Returns the persisted user with its assigned ID.
    /// Returns `Err(RepositoryError::AlreadyExists)` on a duplicate username.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Total and active user counts for the dashboard.
    async fn counts(&self) -> Result<ActivityCounts, RepositoryError>;
}
