//! Request log domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One authenticated proxied call: which key, which endpoint, when.
///
/// Rows are append-only. They are written after authentication succeeds and
/// before the upstream forward, so a failed forward still leaves its row.
/// Rows outlive the key that produced them; deleting a key keeps its history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLog {
    /// Database ID of the log row.
    pub id: i64,
    /// ID of the API key that authenticated the call.
    pub api_key_id: i64,
    /// Gateway path that was invoked (e.g. `/api/tags`).
    pub endpoint: String,
    /// UTC timestamp of the call.
    pub timestamp: DateTime<Utc>,
}
