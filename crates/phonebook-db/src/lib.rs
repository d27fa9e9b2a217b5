//! `SQLite` adapters for the phonebook ports.
//!
//! [`setup_database`] opens (or creates) the database file and applies the
//! schema; [`CoreFactory`] wires the repositories into an `AppCore`.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{SqliteContactRepository, SqliteDepartmentRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
