#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use auth::{AuthError, TokenSigner, TokenSubject};
pub use config::{DEFAULT_PORT, DEFAULT_UPSTREAM_URL, ConfigError, GatewayConfig};
pub use domain::{
    ActivityCounts, ApiKey, DashboardStats, NewApiKey, NewUser, RequestLog, Session, User,
};
pub use ports::{
    ApiKeyRepository, CoreError, Repos, RepositoryError, RequestLogRepository, SessionStore,
    UpstreamError, UpstreamPort, UpstreamReply, UserRepository,
};
pub use services::{AdminService, CredentialVerifier, MemorySessionStore};

// Silence unused dev-dependency warnings until we add mock-based tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
