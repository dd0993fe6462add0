//! Composition utilities for wiring `SQLite` repositories.
//!
//! Focused purely on construction; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use llamagate_core::Repos;

use crate::repositories::{
    SqliteApiKeyRepository, SqliteRequestLogRepository, SqliteUserRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct RepoFactory;

impl RepoFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    /// Returns the `Repos` container from `llamagate-core` holding
    /// trait-object-wrapped repositories.
    #[must_use]
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteApiKeyRepository::new(pool.clone())),
            Arc::new(SqliteRequestLogRepository::new(pool)),
        )
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build the full repository container over this database.
    pub fn repos(&self) -> Repos {
        RepoFactory::build_repos(self.pool.clone())
    }
}
