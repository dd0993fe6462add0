//! Domain entity types.
//!
//! These types represent the credential store's entities and the view data
//! derived from them, independent of any infrastructure concerns.

pub mod api_key;
pub mod request_log;
pub mod session;
pub mod stats;
pub mod user;

pub use api_key::{ApiKey, NewApiKey};
pub use request_log::RequestLog;
pub use session::Session;
pub use stats::{ActivityCounts, DashboardStats};
pub use user::{NewUser, User};
