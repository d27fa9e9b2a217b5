//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use std::sync::Arc;

use sqlx::SqlitePool;

use phonebook_core::services::AppCore;
use phonebook_core::{CoreError, Repos, Settings};

use crate::repositories::{SqliteContactRepository, SqliteDepartmentRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteDepartmentRepository::new(pool.clone())),
            Arc::new(SqliteContactRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` instance from a pool and settings.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = AppCore::new(repos, settings)?;
    /// ```
    pub fn build_app_core(pool: SqlitePool, settings: Settings) -> Result<AppCore, CoreError> {
        AppCore::new(Self::build_repos(pool), settings)
    }

    /// Create a department repository from a pool.
    pub fn department_repository(pool: SqlitePool) -> Arc<SqliteDepartmentRepository> {
        Arc::new(SqliteDepartmentRepository::new(pool))
    }

    /// Create a contact repository from a pool.
    pub fn contact_repository(pool: SqlitePool) -> Arc<SqliteContactRepository> {
        Arc::new(SqliteContactRepository::new(pool))
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

    /// Build an `AppCore` over this database.
    pub fn app_core(&self, settings: Settings) -> Result<AppCore, CoreError> {
        CoreFactory::build_app_core(self.pool.clone(), settings)
    }

    /// Create a department repository using this test database.
    pub fn department_repository(&self) -> SqliteDepartmentRepository {
        SqliteDepartmentRepository::new(self.pool.clone())
    }

    /// Create a contact repository using this test database.
    pub fn contact_repository(&self) -> SqliteContactRepository {
        SqliteContactRepository::new(self.pool.clone())
    }
}
