//! Credential primitives: password hashing, signed access tokens, and
//! secret generation.
//!
//! Everything here is pure computation; the policy around it (lookups,
//! active checks, uniform failures) lives in `services::verifier`.

mod password;
mod secrets;
mod token;

use thiserror::Error;

pub use password::{hash_password, verify_password};
pub use secrets::{
    generate_api_key, generate_session_token, generate_signing_secret, API_KEY_PREFIX,
};
pub use token::{AccessClaims, TokenSigner, TokenSubject};

/// Errors from the auth primitives.
///
/// Verification failures are not errors; they surface as `None`/`false`
/// from the respective functions. These variants cover the cases where the
/// primitive itself could not do its job.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password hashing failed (salt or parameter problem).
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Token signing failed.
    #[error("token encoding failed: {0}")]
    TokenEncode(String),
}
