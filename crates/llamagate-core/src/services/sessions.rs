//! In-memory browser session store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Session;
use crate::ports::SessionStore;

/// Process-local [`SessionStore`] backed by a `HashMap`.
///
/// Sessions vanish on restart, which forces a fresh login. Expired entries
/// are evicted lazily on lookup rather than by a background sweeper.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: Session) {
        self.sessions
            .lock()
            .await
            .insert(session.token.clone(), session);
    }

    async fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(session) if session.is_expired(Utc::now()) => {
                debug!(username = %session.username, "evicting expired session");
                sessions.remove(token);
                None
            }
            Some(session) => Some(session.clone()),
            None => None,
        }
    }

    async fn remove(&self, token: &str) {
        self.sessions.lock().await.remove(token);
    }
}
