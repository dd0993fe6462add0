//! Session store trait definition.
//!
//! The web UI's session map sits behind this seam so the single-process
//! in-memory default and a shared backend (database, cache) are
//! interchangeable. A multi-instance deployment must swap the default out.

use async_trait::async_trait;

use crate::domain::Session;

/// Store for browser sessions keyed by opaque token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session under its token.
    async fn insert(&self, session: Session);

    /// Look up a live session. Expired entries are dropped and not returned.
    async fn get(&self, token: &str) -> Option<Session>;

    /// Remove a session (logout). Unknown tokens are a no-op.
    async fn remove(&self, token: &str);
}
