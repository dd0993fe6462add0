//! Credential verification service.
//!
//! One service, four credential paths: exact API key secrets, signed bearer
//! tokens, username/password logins, and operator-token resolution. Every
//! rejection is reported to callers as `Ok(None)` so the HTTP layer answers
//! a uniform 401; the reason is only visible in logs.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::auth::{TokenSigner, TokenSubject};
use crate::domain::{ApiKey, User};
use crate::ports::{ApiKeyRepository, CoreError, RepositoryError, UserRepository};

/// Validates credentials against the store and mints access tokens.
pub struct CredentialVerifier {
    users: Arc<dyn UserRepository>,
    api_keys: Arc<dyn ApiKeyRepository>,
    signer: TokenSigner,
}

impl CredentialVerifier {
    /// Create a new verifier.
    pub fn new(
        users: Arc<dyn UserRepository>,
        api_keys: Arc<dyn ApiKeyRepository>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            users,
            api_keys,
            signer,
        }
    }

    /// Verify an API key secret presented in the `X-API-Key` header.
    ///
    /// Succeeds only for an exact secret match on an active key, and stamps
    /// `last_used` on success.
    pub async fn verify_api_key(&self, secret: &str) -> Result<Option<ApiKey>, CoreError> {
        match self.api_keys.get_by_secret(secret).await {
            Ok(key) => self.admit_key(key).await,
            Err(RepositoryError::NotFound(_)) => {
                debug!("api key rejected: no matching secret");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verify a bearer credential and resolve it to an API key.
    ///
    /// A well-formed signed token must validate and carry a `key:<id>`
    /// subject that resolves to an existing key. Anything that does not
    /// validate as a token falls through to the exact-secret path, which is
    /// how OpenAI-style clients present raw keys as bearers (a tampered
    /// token cannot match a stored secret, so the fallthrough is inert for
    /// it). Stamps `last_used` on success.
    pub async fn verify_bearer_token(&self, token: &str) -> Result<Option<ApiKey>, CoreError> {
        match self.signer.decode(token) {
            Some(TokenSubject::Key(id)) => match self.api_keys.get_by_id(id).await {
                Ok(key) => self.admit_key(key).await,
                Err(RepositoryError::NotFound(_)) => {
                    debug!(key_id = id, "bearer token rejected: key no longer exists");
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            },
            Some(TokenSubject::User(_)) => {
                debug!("bearer token rejected: operator token on an API surface");
                Ok(None)
            }
            None => self.verify_api_key(token).await,
        }
    }

    /// Verify a username/password pair.
    ///
    /// The password check is delegated to argon2, which compares digests in
    /// constant time. Inactive users fail like unknown ones.
    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, CoreError> {
        let user = match self.users.get_by_username(username).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => {
                debug!(username, "login rejected: unknown user");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        if !user.is_active {
            debug!(username, "login rejected: user inactive");
            return Ok(None);
        }
        if !crate::auth::verify_password(password, &user.hashed_password) {
            debug!(username, "login rejected: password mismatch");
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Issue an operator token for an authenticated user.
    pub fn create_access_token(&self, user: &User) -> Result<String, CoreError> {
        Ok(self.signer.issue_for_user(&user.username)?)
    }

    /// Issue a key-scoped token, or `None` if the key doesn't exist.
    pub async fn create_key_token(&self, key_id: i64) -> Result<Option<String>, CoreError> {
        match self.api_keys.get_by_id(key_id).await {
            Ok(key) => Ok(Some(self.signer.issue_for_key(key.id)?)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve an operator token to its user.
    ///
    /// The token must validate, carry a `user:` subject, and name an
    /// existing active user.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, CoreError> {
        let Some(TokenSubject::User(username)) = self.signer.decode(token) else {
            debug!("operator token rejected: invalid or not a user token");
            return Ok(None);
        };
        match self.users.get_by_username(&username).await {
            Ok(user) if user.is_active => Ok(Some(user)),
            Ok(_) => {
                debug!(username, "operator token rejected: user inactive");
                Ok(None)
            }
            Err(RepositoryError::NotFound(_)) => {
                debug!(username, "operator token rejected: user no longer exists");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Admission policy shared by both key paths: active flag, then the
    /// `last_used` stamp.
    async fn admit_key(&self, key: ApiKey) -> Result<Option<ApiKey>, CoreError> {
        if !key.is_active {
            debug!(key_id = key.id, key_name = %key.key_name, "api key rejected: inactive");
            return Ok(None);
        }
        self.api_keys.touch_last_used(key.id, Utc::now()).await?;
        Ok(Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{key, user, MemKeyRepo, MemUserRepo};
    use chrono::Duration;

    fn verifier(users: Arc<MemUserRepo>, keys: Arc<MemKeyRepo>) -> CredentialVerifier {
        CredentialVerifier::new(users, keys, TokenSigner::new("test-secret", Duration::minutes(30)))
    }

    #[tokio::test]
    async fn test_verify_api_key_active_only() {
        let keys = MemKeyRepo::with(vec![key(1, "sk_live", true), key(2, "sk_dead", false)]);
        let v = verifier(MemUserRepo::with(vec![]), keys.clone());

        let hit = v.verify_api_key("sk_live").await.unwrap();
        assert_eq!(hit.map(|k| k.id), Some(1));

        assert!(v.verify_api_key("sk_dead").await.unwrap().is_none());
        assert!(v.verify_api_key("sk_unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_verify_api_key_stamps_last_used() {
        let keys = MemKeyRepo::with(vec![key(1, "sk_live", true)]);
        let v = verifier(MemUserRepo::with(vec![]), keys.clone());

        v.verify_api_key("sk_live").await.unwrap().unwrap();
        let stored = keys.get_by_id(1).await.unwrap();
        assert!(stored.last_used.is_some());
    }

    #[tokio::test]
    async fn test_bearer_accepts_raw_secret() {
        let keys = MemKeyRepo::with(vec![key(1, "sk_live", true)]);
        let v = verifier(MemUserRepo::with(vec![]), keys);

        let hit = v.verify_bearer_token("sk_live").await.unwrap();
        assert_eq!(hit.map(|k| k.id), Some(1));
    }

    #[tokio::test]
    async fn test_bearer_accepts_key_scoped_token() {
        let keys = MemKeyRepo::with(vec![key(7, "sk_live", true)]);
        let v = verifier(MemUserRepo::with(vec![]), keys);

        let token = v.create_key_token(7).await.unwrap().unwrap();
        let hit = v.verify_bearer_token(&token).await.unwrap();
        assert_eq!(hit.map(|k| k.id), Some(7));
    }

    #[tokio::test]
    async fn test_bearer_rejects_token_for_missing_or_inactive_key() {
        let keys = MemKeyRepo::with(vec![key(7, "sk_live", false)]);
        let v = verifier(MemUserRepo::with(vec![]), keys.clone());

        // Token minting only needs existence; verification requires active
        let token = v.create_key_token(7).await.unwrap().unwrap();
        assert!(v.verify_bearer_token(&token).await.unwrap().is_none());

        keys.delete(7).await.unwrap();
        assert!(v.verify_bearer_token(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bearer_rejects_operator_token() {
        let users = MemUserRepo::with(vec![user(1, "admin", "admin123", true)]);
        let keys = MemKeyRepo::with(vec![key(1, "sk_live", true)]);
        let v = verifier(users.clone(), keys);

        let admin = users.get_by_username("admin").await.unwrap();
        let token = v.create_access_token(&admin).unwrap();
        assert!(v.verify_bearer_token(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_user_paths() {
        let users = MemUserRepo::with(vec![
            user(1, "admin", "admin123", true),
            user(2, "ghost", "pw", false),
        ]);
        let v = verifier(users, MemKeyRepo::with(vec![]));

        let hit = v.authenticate_user("admin", "admin123").await.unwrap();
        assert_eq!(hit.map(|u| u.id), Some(1));

        assert!(v.authenticate_user("admin", "wrong").await.unwrap().is_none());
        assert!(v.authenticate_user("nobody", "admin123").await.unwrap().is_none());
        assert!(v.authenticate_user("ghost", "pw").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_user_round_trip() {
        let users = MemUserRepo::with(vec![user(1, "admin", "admin123", true)]);
        let v = verifier(users.clone(), MemKeyRepo::with(vec![]));

        let admin = users.get_by_username("admin").await.unwrap();
        let token = v.create_access_token(&admin).unwrap();

        let resolved = v.current_user(&token).await.unwrap();
        assert_eq!(resolved.map(|u| u.username), Some("admin".to_string()));

        assert!(v.current_user("garbage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_key_token_missing_key() {
        let v = verifier(MemUserRepo::with(vec![]), MemKeyRepo::with(vec![]));
        assert!(v.create_key_token(99).await.unwrap().is_none());
    }
}
