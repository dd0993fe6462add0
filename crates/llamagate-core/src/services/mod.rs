//! Core services orchestrating the ports.

pub mod admin;
pub mod sessions;
pub mod verifier;

pub use admin::AdminService;
pub use sessions::MemorySessionStore;
pub use verifier::CredentialVerifier;
