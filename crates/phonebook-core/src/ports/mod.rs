//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are minimal and storage-focused; business rules live in services
//! - Bulk reads are first-class: the hierarchy is resolved from one `list()`

pub mod contact_repository;
pub mod department_repository;

use std::sync::Arc;
use thiserror::Error;

pub use contact_repository::{ContactFilter, ContactRepository};
pub use department_repository::DepartmentRepository;

/// Container for all repository trait objects.
///
/// Lives in `phonebook-core` so that `AppCore` can accept it without
/// depending on `phonebook-db`.
///
/// # Example
///
/// ```ignore
/// // In phonebook-db factory:
/// let repos = CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, settings);
/// ```
#[derive(Clone)]
pub struct Repos {
    /// Department repository (tree nodes).
    pub departments: Arc<dyn DepartmentRepository>,
    /// Contact repository (employees and their phones).
    pub contacts: Arc<dyn ContactRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        departments: Arc<dyn DepartmentRepository>,
        contacts: Arc<dyn ContactRepository>,
    ) -> Self {
        Self {
            departments,
            contacts,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same unique key already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A constraint was violated (e.g., foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, HTTP
/// statuses). The core never swallows `NotFound` or `InvalidData`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced department or contact does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A business rule or field constraint was violated.
    #[error("Invalid {field}: {reason}")]
    InvalidData { field: String, reason: String },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{entity} with ID {id}"))
    }

    /// Shorthand for a rejected operation.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub const fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData { .. })
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            other => Self::Repository(other),
        }
    }
}

impl From<crate::domain::FieldError> for CoreError {
    fn from(err: crate::domain::FieldError) -> Self {
        Self::InvalidData {
            field: err.field.to_string(),
            reason: err.reason,
        }
    }
}
