//! User domain types.
//!
//! A user is an administrative identity: it can mint access tokens, manage
//! API keys, and sign in to the web UI. Users authenticate machine traffic
//! only indirectly, through the API keys they create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user with a database ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database ID of the user.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// PHC-format argon2id digest of the password. Never serialized.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Whether the user may authenticate. Inactive users keep their row.
    pub is_active: bool,
    /// UTC timestamp of account creation.
    pub created_at: DateTime<Utc>,
    /// UTC timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// A user to be inserted (no ID yet).
///
/// Carries the already-hashed password; hashing happens in the service
/// layer so repositories never see plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// PHC-format argon2id digest of the password.
    pub hashed_password: String,
}

impl NewUser {
    #[must_use]
    pub const fn new(username: String, hashed_password: String) -> Self {
        Self {
            username,
            hashed_password,
        }
    }
}
