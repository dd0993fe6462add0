//! In-memory port implementations and builders shared across unit tests.

use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::hash_password;
use crate::domain::{ActivityCounts, ApiKey, NewApiKey, NewUser, RequestLog, Session, User};
use crate::ports::{
    ApiKeyRepository, RepositoryError, RequestLogRepository, SessionStore, UserRepository,
};

/// Shared lock to serialize tests that read or write environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard that restores an environment variable to its original value on
/// drop. Acquire [`ENV_LOCK`] first.
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable and return a guard that will restore it.
    #[allow(unsafe_code)]
    pub fn set(key: &str, value: &str) -> Self {
        let previous = env::var(key).ok();
        unsafe {
            env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }

    /// Unset an environment variable and return a guard that will restore it.
    #[allow(unsafe_code)]
    pub fn unset(key: &str) -> Self {
        let previous = env::var(key).ok();
        unsafe {
            env::remove_var(key);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        unsafe {
            match &self.previous {
                Some(value) => env::set_var(&self.key, value),
                None => env::remove_var(&self.key),
            }
        }
    }
}

/// Build a persisted-looking user with a real argon2 hash of `password`.
pub fn user(id: i64, username: &str, password: &str, active: bool) -> User {
    let now = Utc::now();
    User {
        id,
        username: username.to_string(),
        hashed_password: hash_password(password).unwrap(),
        is_active: active,
        created_at: now,
        updated_at: now,
    }
}

/// Build a persisted-looking API key.
pub fn key(id: i64, secret: &str, active: bool) -> ApiKey {
    let now = Utc::now();
    ApiKey {
        id,
        key_name: format!("key-{id}"),
        api_key: secret.to_string(),
        is_active: active,
        created_at: now,
        updated_at: now,
        last_used: None,
    }
}

/// In-memory `UserRepository`.
pub struct MemUserRepo {
    users: Mutex<Vec<User>>,
}

impl MemUserRepo {
    pub fn with(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(users),
        })
    }
}

#[async_trait]
impl UserRepository for MemUserRepo {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("user {id}")))
    }

    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("user {username}")))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists(user.username.clone()));
        }
        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            username: user.username.clone(),
            hashed_password: user.hashed_password.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn counts(&self) -> Result<ActivityCounts, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(ActivityCounts {
            total: users.len() as i64,
            active: users.iter().filter(|u| u.is_active).count() as i64,
        })
    }
}

/// In-memory `ApiKeyRepository`.
pub struct MemKeyRepo {
    keys: Mutex<Vec<ApiKey>>,
    next_id: Mutex<i64>,
}

impl MemKeyRepo {
    pub fn with(keys: Vec<ApiKey>) -> Arc<Self> {
        let next_id = keys.iter().map(|k| k.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            keys: Mutex::new(keys),
            next_id: Mutex::new(next_id),
        })
    }
}

#[async_trait]
impl ApiKeyRepository for MemKeyRepo {
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<ApiKey>, RepositoryError> {
        let keys = self.keys.lock().unwrap();
        Ok(keys
            .iter()
            .skip(usize::try_from(skip.max(0)).unwrap_or(0))
            .take(usize::try_from(limit.max(0)).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<ApiKey, RepositoryError> {
        self.keys
            .lock()
            .unwrap()
            .iter()
            .find(|k| k.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("api key {id}")))
    }

    async fn get_by_secret(&self, secret: &str) -> Result<ApiKey, RepositoryError> {
        self.keys
            .lock()
            .unwrap()
            .iter()
            .find(|k| k.api_key == secret)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound("api key".to_string()))
    }

    async fn insert(&self, key: &NewApiKey) -> Result<ApiKey, RepositoryError> {
        let mut keys = self.keys.lock().unwrap();
        if keys.iter().any(|k| k.api_key == key.api_key) {
            return Err(RepositoryError::AlreadyExists(key.key_name.clone()));
        }
        let mut next_id = self.next_id.lock().unwrap();
        let now = Utc::now();
        let key = ApiKey {
            id: *next_id,
            key_name: key.key_name.clone(),
            api_key: key.api_key.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_used: None,
        };
        *next_id += 1;
        keys.push(key.clone());
        Ok(key)
    }

    async fn set_active(&self, id: i64, is_active: bool) -> Result<ApiKey, RepositoryError> {
        let mut keys = self.keys.lock().unwrap();
        let key = keys
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("api key {id}")))?;
        key.is_active = is_active;
        key.updated_at = Utc::now();
        Ok(key.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut keys = self.keys.lock().unwrap();
        let before = keys.len();
        keys.retain(|k| k.id != id);
        if keys.len() == before {
            return Err(RepositoryError::NotFound(format!("api key {id}")));
        }
        Ok(())
    }

    async fn touch_last_used(&self, id: i64, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut keys = self.keys.lock().unwrap();
        let key = keys
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("api key {id}")))?;
        key.last_used = Some(at);
        Ok(())
    }

    async fn counts(&self) -> Result<ActivityCounts, RepositoryError> {
        let keys = self.keys.lock().unwrap();
        Ok(ActivityCounts {
            total: keys.len() as i64,
            active: keys.iter().filter(|k| k.is_active).count() as i64,
        })
    }

    async fn recently_used(&self, limit: i64) -> Result<Vec<ApiKey>, RepositoryError> {
        let mut keys = self.keys.lock().unwrap().clone();
        keys.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        keys.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(keys)
    }
}

/// In-memory `RequestLogRepository`.
pub struct MemLogRepo {
    logs: Mutex<Vec<RequestLog>>,
}

impl MemLogRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            logs: Mutex::new(Vec::new()),
        })
    }

    pub fn len(&self) -> usize {
        self.logs.lock().unwrap().len()
    }
}

#[async_trait]
impl RequestLogRepository for MemLogRepo {
    async fn append(&self, api_key_id: i64, endpoint: &str) -> Result<RequestLog, RepositoryError> {
        let mut logs = self.logs.lock().unwrap();
        let log = RequestLog {
            id: logs.len() as i64 + 1,
            api_key_id,
            endpoint: endpoint.to_string(),
            timestamp: Utc::now(),
        };
        logs.push(log.clone());
        Ok(log)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError> {
        let logs = self.logs.lock().unwrap();
        Ok(logs.iter().filter(|l| l.timestamp >= since).count() as i64)
    }
}

/// In-memory `SessionStore` mirroring the production store's semantics.
pub struct MemSessions {
    sessions: Mutex<Vec<Session>>,
}

impl MemSessions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sessions: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SessionStore for MemSessions {
    async fn insert(&self, session: Session) {
        self.sessions.lock().unwrap().push(session);
    }

    async fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().unwrap();
        let found = sessions.iter().find(|s| s.token == token).cloned()?;
        if found.is_expired(Utc::now()) {
            sessions.retain(|s| s.token != token);
            return None;
        }
        Some(found)
    }

    async fn remove(&self, token: &str) {
        self.sessions.lock().unwrap().retain(|s| s.token != token);
    }
}
