//! Upstream port error type.

use thiserror::Error;

/// Result alias for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors surfaced by the upstream client.
///
/// The two variants are deliberately distinct: a daemon that cannot be
/// reached is a 503 to callers, a daemon that answered garbage is a 500.
/// Transport details stay in the message and never cross the HTTP boundary.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network-level failure: connection refused, timeout, DNS.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The daemon responded, but not with the expected payload format.
    #[error("bad upstream response: {0}")]
    Protocol(String),
}
