//! `SQLite` implementation of the `ApiKeyRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use llamagate_core::{ActivityCounts, ApiKey, ApiKeyRepository, NewApiKey, RepositoryError};

use super::row_mappers::{API_KEY_SELECT_COLUMNS, row_to_api_key};

/// `SQLite` implementation of the `ApiKeyRepository` trait.
pub struct SqliteApiKeyRepository {
    pool: SqlitePool,
}

impl SqliteApiKeyRepository {
    /// Create a new `SQLite` API key repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for SqliteApiKeyRepository {
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<ApiKey>, RepositoryError> {
        let query =
            format!("SELECT {API_KEY_SELECT_COLUMNS} FROM api_keys ORDER BY id LIMIT ? OFFSET ?");

        let rows = sqlx::query(&query)
            .bind(limit.max(0))
            .bind(skip.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_api_key).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<ApiKey, RepositoryError> {
        let query = format!("SELECT {API_KEY_SELECT_COLUMNS} FROM api_keys WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("API key with ID {id}")))?;

        row_to_api_key(&row)
    }

    async fn get_by_secret(&self, secret: &str) -> Result<ApiKey, RepositoryError> {
        let query = format!("SELECT {API_KEY_SELECT_COLUMNS} FROM api_keys WHERE api_key = ?");

        let row = sqlx::query(&query)
            .bind(secret)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            // Never echo the secret back in an error
            .ok_or_else(|| RepositoryError::NotFound("API key".to_string()))?;

        row_to_api_key(&row)
    }

    async fn insert(&self, key: &NewApiKey) -> Result<ApiKey, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO api_keys (key_name, api_key, is_active, created_at, updated_at) \
             VALUES (?, ?, 1, ?, ?)",
        )
        .bind(&key.key_name)
        .bind(&key.api_key)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                RepositoryError::AlreadyExists(format!("API key '{}'", key.key_name))
            } else {
                RepositoryError::Storage(e.to_string())
            }
        })?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn set_active(&self, id: i64, is_active: bool) -> Result<ApiKey, RepositoryError> {
        let result = sqlx::query("UPDATE api_keys SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(is_active)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("API key with ID {id}")));
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("API key with ID {id}")));
        }

        Ok(())
    }

    async fn touch_last_used(&self, id: i64, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE api_keys SET last_used = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("API key with ID {id}")));
        }

        Ok(())
    }

    async fn counts(&self) -> Result<ActivityCounts, RepositoryError> {
        let (total, active): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(is_active), 0) FROM api_keys",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(ActivityCounts { total, active })
    }

    async fn recently_used(&self, limit: i64) -> Result<Vec<ApiKey>, RepositoryError> {
        let query = format!(
            "SELECT {API_KEY_SELECT_COLUMNS} FROM api_keys \
             ORDER BY last_used IS NULL, last_used DESC, id LIMIT ?"
        );

        let rows = sqlx::query(&query)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_api_key).collect()
    }
}
