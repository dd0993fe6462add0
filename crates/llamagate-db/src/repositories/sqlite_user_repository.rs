//! `SQLite` implementation of the `UserRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use llamagate_core::{ActivityCounts, NewUser, RepositoryError, User, UserRepository};

use super::row_mappers::{USER_SELECT_COLUMNS, row_to_user};

/// `SQLite` implementation of the `UserRepository` trait.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new `SQLite` user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let query = format!("SELECT {USER_SELECT_COLUMNS} FROM users ORDER BY id");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        let query = format!("SELECT {USER_SELECT_COLUMNS} FROM users WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("User with ID {id}")))?;

        row_to_user(&row)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        let query = format!("SELECT {USER_SELECT_COLUMNS} FROM users WHERE username = ?");

        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("User '{username}'")))?;

        row_to_user(&row)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (username, hashed_password, is_active, created_at, updated_at) \
             VALUES (?, ?, 1, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.hashed_password)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                RepositoryError::AlreadyExists(format!("User '{}'", user.username))
            } else {
                RepositoryError::Storage(e.to_string())
            }
        })?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn counts(&self) -> Result<ActivityCounts, RepositoryError> {
        let (total, active): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(is_active), 0) FROM users",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(ActivityCounts { total, active })
    }
}
