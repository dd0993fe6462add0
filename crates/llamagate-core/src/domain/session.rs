//! Browser session domain type.
//!
//! Sessions back the admin web UI only. They are ephemeral: held by a
//! `SessionStore` implementation, bounded by an absolute expiry that mirrors
//! the cookie max-age, and lost on process restart with the default
//! in-memory store.

use chrono::{DateTime, Duration, Utc};

/// An opaque-token session bound to a user.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token, also the cookie value. URL-safe, high entropy.
    pub token: String,
    /// ID of the signed-in user.
    pub user_id: i64,
    /// Login name of the signed-in user, kept for page rendering.
    pub username: String,
    /// UTC timestamp of login.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry. Stores drop the session at or after this instant.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session starting now with the given time-to-live.
    #[must_use]
    pub fn new(token: String, user_id: i64, username: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            username,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the session is expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
