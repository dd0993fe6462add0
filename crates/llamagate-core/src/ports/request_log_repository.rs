//! Request log repository trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::RequestLog;

/// Repository for the append-only usage log.
///
/// No update and no delete: rows are history. The referenced key must exist
/// at append time (it authenticated the call); it may be deleted later.
#[async_trait]
pub trait RequestLogRepository: Send + Sync {
    /// Append one usage row stamped with the current time.
    async fn append(&self, api_key_id: i64, endpoint: &str) -> Result<RequestLog, RepositoryError>;

    /// Count rows with `timestamp >= since`.
    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError>;
}
