//! API key domain types.
//!
//! An API key is the long-lived machine credential: an opaque `sk_`-prefixed
//! secret handed to clients, presented either in the `X-API-Key` header or as
//! a bearer value. Keys are created and managed by administrators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted API key with a database ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Database ID of the key.
    pub id: i64,
    /// Human-readable label ("ci-bot", "staging-ingest", ...). Not unique.
    pub key_name: String,
    /// The opaque secret value. Globally unique across the store.
    pub api_key: String,
    /// Whether the key passes verification. Inactive keys fail with 401.
    pub is_active: bool,
    /// UTC timestamp of key creation.
    pub created_at: DateTime<Utc>,
    /// UTC timestamp of the last mutation (toggle).
    pub updated_at: DateTime<Utc>,
    /// UTC timestamp of the last successful verification, if any.
    pub last_used: Option<DateTime<Utc>>,
}

/// An API key to be inserted (no ID yet).
///
/// The secret is generated server-side before insertion; callers only
/// choose the label.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    /// Human-readable label.
    pub key_name: String,
    /// Generated `sk_`-prefixed secret.
    pub api_key: String,
}

impl NewApiKey {
    #[must_use]
    pub const fn new(key_name: String, api_key: String) -> Self {
        Self { key_name, api_key }
    }
}
