//! Administrative operations: user and API key management, dashboard
//! aggregates, startup seeding.

use chrono::{NaiveTime, Utc};
use tracing::{info, warn};

use crate::auth::{generate_api_key, hash_password};
use crate::domain::{ApiKey, DashboardStats, NewApiKey, NewUser, User};
use crate::ports::{CoreError, Repos, RepositoryError};

/// How many keys the dashboard's recent-activity panel shows.
pub const RECENT_ACTIVITY_LIMIT: i64 = 5;

/// Service backing the admin API and the web console.
pub struct AdminService {
    repos: Repos,
}

impl AdminService {
    /// Create a new admin service over the repository set.
    #[must_use]
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    /// Create a user with an argon2-hashed password.
    ///
    /// Duplicate usernames surface as a repository conflict.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, CoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::Validation("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(CoreError::Validation("password must not be empty".into()));
        }
        let user = self
            .repos
            .users
            .insert(&NewUser {
                username: username.to_string(),
                hashed_password: hash_password(password)?,
            })
            .await?;
        info!(username = %user.username, user_id = user.id, "created user");
        Ok(user)
    }

    /// List every user.
    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.repos.users.list().await?)
    }

    /// Create an API key with a freshly generated secret.
    pub async fn create_api_key(&self, key_name: &str) -> Result<ApiKey, CoreError> {
        let key_name = key_name.trim();
        if key_name.is_empty() {
            return Err(CoreError::Validation("key name must not be empty".into()));
        }
        let key = self
            .repos
            .api_keys
            .insert(&NewApiKey {
                key_name: key_name.to_string(),
                api_key: generate_api_key(),
            })
            .await?;
        info!(key_id = key.id, key_name = %key.key_name, "created api key");
        Ok(key)
    }

    /// List API keys with offset pagination.
    pub async fn list_api_keys(&self, skip: i64, limit: i64) -> Result<Vec<ApiKey>, CoreError> {
        Ok(self.repos.api_keys.list(skip, limit).await?)
    }

    /// Fetch a single API key by id.
    pub async fn get_api_key(&self, id: i64) -> Result<ApiKey, CoreError> {
        Ok(self.repos.api_keys.get_by_id(id).await?)
    }

    /// Enable or disable a key. Disabled keys fail verification but keep
    /// their usage history.
    pub async fn set_api_key_active(
        &self,
        id: i64,
        is_active: bool,
    ) -> Result<ApiKey, CoreError> {
        let key = self.repos.api_keys.set_active(id, is_active).await?;
        info!(key_id = id, is_active, "toggled api key");
        Ok(key)
    }

    /// Delete a key. Its request logs are kept for accounting.
    pub async fn delete_api_key(&self, id: i64) -> Result<(), CoreError> {
        self.repos.api_keys.delete(id).await?;
        info!(key_id = id, "deleted api key");
        Ok(())
    }

    /// Aggregate counters for the dashboard. "Today" is the current UTC day.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
        let keys = self.repos.api_keys.counts().await?;
        let users = self.repos.users.counts().await?;
        let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let requests_today = self.repos.request_logs.count_since(midnight).await?;
        Ok(DashboardStats {
            total_api_keys: keys.total,
            active_api_keys: keys.active,
            total_users: users.total,
            active_users: users.active,
            requests_today,
        })
    }

    /// Most recently used keys, newest first.
    pub async fn recent_activity(&self) -> Result<Vec<ApiKey>, CoreError> {
        Ok(self
            .repos
            .api_keys
            .recently_used(RECENT_ACTIVITY_LIMIT)
            .await?)
    }

    /// Create the default operator account unless one already exists.
    ///
    /// Returns the user when one was created so the caller can decide how
    /// loudly to announce the credentials.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, CoreError> {
        match self.repos.users.get_by_username(username).await {
            Ok(_) => Ok(None),
            Err(RepositoryError::NotFound(_)) => {
                let user = self.create_user(username, password).await?;
                warn!(
                    username = %user.username,
                    "created default admin user, change its password"
                );
                Ok(Some(user))
            }
            Err(e) => Err(e.into()),
        }
    }
}
