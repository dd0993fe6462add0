//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, Utc};
use llamagate_core::{ApiKey, RepositoryError, RequestLog, User};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for user queries.
pub const USER_SELECT_COLUMNS: &str =
    "id, username, hashed_password, is_active, created_at, updated_at";

/// Shared SELECT column list for API key queries.
pub const API_KEY_SELECT_COLUMNS: &str =
    "id, key_name, api_key, is_active, created_at, updated_at, last_used";

/// Shared SELECT column list for request log queries.
pub const REQUEST_LOG_SELECT_COLUMNS: &str = "id, api_key_id, endpoint, timestamp";

fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Parse a database row into a `User`.
pub fn row_to_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    Ok(User {
        id: row.try_get("id").map_err(storage)?,
        username: row.try_get("username").map_err(storage)?,
        hashed_password: row.try_get("hashed_password").map_err(storage)?,
        is_active: row.try_get("is_active").map_err(storage)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(storage)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(storage)?,
    })
}

/// Parse a database row into an `ApiKey`.
pub fn row_to_api_key(row: &SqliteRow) -> Result<ApiKey, RepositoryError> {
    Ok(ApiKey {
        id: row.try_get("id").map_err(storage)?,
        key_name: row.try_get("key_name").map_err(storage)?,
        api_key: row.try_get("api_key").map_err(storage)?,
        is_active: row.try_get("is_active").map_err(storage)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(storage)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(storage)?,
        last_used: row
            .try_get::<Option<DateTime<Utc>>, _>("last_used")
            .map_err(storage)?,
    })
}

/// Parse a database row into a `RequestLog`.
pub fn row_to_request_log(row: &SqliteRow) -> Result<RequestLog, RepositoryError> {
    Ok(RequestLog {
        id: row.try_get("id").map_err(storage)?,
        api_key_id: row.try_get("api_key_id").map_err(storage)?,
        endpoint: row.try_get("endpoint").map_err(storage)?,
        timestamp: row
            .try_get::<DateTime<Utc>, _>("timestamp")
            .map_err(storage)?,
    })
}
