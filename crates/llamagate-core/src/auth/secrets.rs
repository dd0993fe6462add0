//! Random secret generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Prefix on every generated API key secret.
pub const API_KEY_PREFIX: &str = "sk_";

/// Generate an API key secret: `sk_` plus 32 random bytes hex-encoded.
///
/// 256 bits of entropy; uniqueness is backed by the store's unique
/// constraint but a collision is not a practical concern.
#[must_use]
pub fn generate_api_key() -> String {
    let bytes: [u8; 32] = rand::random();
    format!("{API_KEY_PREFIX}{}", hex::encode(bytes))
}

/// Generate a session token: 32 random bytes, URL-safe base64.
///
/// Cookie-safe without quoting.
#[must_use]
pub fn generate_session_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate an ephemeral JWT signing secret.
///
/// Used when no `SECRET_KEY` is configured. Tokens signed with it die with
/// the process.
#[must_use]
pub fn generate_signing_secret() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
