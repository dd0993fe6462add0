//! `SQLite` implementation of the `RequestLogRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use llamagate_core::{RepositoryError, RequestLog, RequestLogRepository};

use super::row_mappers::{REQUEST_LOG_SELECT_COLUMNS, row_to_request_log};

/// `SQLite` implementation of the `RequestLogRepository` trait.
pub struct SqliteRequestLogRepository {
    pool: SqlitePool,
}

impl SqliteRequestLogRepository {
    /// Create a new `SQLite` request log repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestLogRepository for SqliteRequestLogRepository {
    async fn append(&self, api_key_id: i64, endpoint: &str) -> Result<RequestLog, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO request_logs (api_key_id, endpoint, timestamp) VALUES (?, ?, ?)",
        )
        .bind(api_key_id)
        .bind(endpoint)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let query = format!("SELECT {REQUEST_LOG_SELECT_COLUMNS} FROM request_logs WHERE id = ?");
        let row = sqlx::query(&query)
            .bind(result.last_insert_rowid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row_to_request_log(&row)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM request_logs WHERE timestamp >= ?")
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(count)
    }
}
