//! Repository implementations for `SQLite`.
//!
//! Each repository implements the corresponding trait from
//! `llamagate_core::ports` and owns a clone of the shared pool.

pub mod row_mappers;
pub mod sqlite_api_key_repository;
pub mod sqlite_request_log_repository;
pub mod sqlite_user_repository;

pub use sqlite_api_key_repository::SqliteApiKeyRepository;
pub use sqlite_request_log_repository::SqliteRequestLogRepository;
pub use sqlite_user_repository::SqliteUserRepository;
