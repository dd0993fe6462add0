//! Signed access tokens.
//!
//! Tokens are HS256 JWTs with `{sub, exp, iat}` claims. The subject string
//! encodes the credential kind with a prefix: `user:<username>` for operator
//! tokens minted from a password login, `key:<id>` for tokens scoped to one
//! API key. Decoding validates signature and expiry and yields the parsed
//! subject; anything else comes back as `None`.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Prefixed subject, e.g. `user:admin` or `key:42`.
    pub sub: String,
    /// Expiration time (seconds since epoch).
    pub exp: i64,
    /// Issued at (seconds since epoch).
    pub iat: i64,
}

/// The credential a validated token refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSubject {
    /// Operator token for a named user.
    User(String),
    /// Token scoped to an API key by ID.
    Key(i64),
}

/// Issues and validates access tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl TokenSigner {
    /// Create a signer from the shared secret and the default token TTL.
    #[must_use]
    pub fn new(secret: &str, default_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl,
        }
    }

    /// Issue a token for a named user with the default TTL.
    pub fn issue_for_user(&self, username: &str) -> Result<String, AuthError> {
        self.issue(format!("user:{username}"), self.default_ttl)
    }

    /// Issue a token scoped to an API key with the default TTL.
    pub fn issue_for_key(&self, key_id: i64) -> Result<String, AuthError> {
        self.issue(format!("key:{key_id}"), self.default_ttl)
    }

    /// Issue a token with an explicit TTL.
    pub fn issue(&self, sub: String, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenEncode(e.to_string()))
    }

    /// Validate a token and parse its subject.
    ///
    /// Returns `None` on structural failure, bad signature, expiry, or an
    /// unrecognized subject shape. Callers treat all of those the same.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<TokenSubject> {
        let data = decode::<AccessClaims>(token, &self.decoding, &Validation::default()).ok()?;
        let sub = data.claims.sub;
        if let Some(username) = sub.strip_prefix("user:") {
            if username.is_empty() {
                return None;
            }
            return Some(TokenSubject::User(username.to_string()));
        }
        if let Some(id) = sub.strip_prefix("key:") {
            return id.parse().ok().map(TokenSubject::Key);
        }
        None
    }
}
