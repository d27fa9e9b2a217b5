//! Department repository trait definition.
//!
//! This port defines the interface for department persistence operations.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Department, DepartmentSummary, NewDepartment};

/// Repository for department persistence operations.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - `list()` is the single bulk read the hierarchy resolver relies on
/// - Business rules (cycles, delete guards, name trimming) live in services
/// - The store enforces the unique-name constraint and reports a clash as
///   `RepositoryError::AlreadyExists`
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Load every department in one read, ordered by ID.
    async fn list(&self) -> Result<Vec<Department>, RepositoryError>;

    /// Every department with its direct contact count, ordered by name.
    async fn list_with_contact_count(&self) -> Result<Vec<DepartmentSummary>, RepositoryError>;

    /// Root departments with their direct contact counts, ordered by name.
    async fn list_roots_with_contact_count(
        &self,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError>;

    /// Departments whose name contains `fragment` (case-insensitive), with counts.
    async fn search_with_contact_count(
        &self,
        fragment: &str,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError>;

    /// Direct children of a department, ordered by name.
    async fn list_children(&self, parent_id: i64) -> Result<Vec<Department>, RepositoryError>;

    /// Get a department by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the department doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Department, RepositoryError>;

    /// Get a department by its exact name.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no department has that name.
    async fn get_by_name(&self, name: &str) -> Result<Department, RepositoryError>;

    /// Whether a department with this exact name exists.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    /// Insert a new department, returning it with its assigned ID.
    async fn insert(&self, department: &NewDepartment) -> Result<Department, RepositoryError>;

    /// Update name and parent of an existing department.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the department doesn't exist.
    async fn update(&self, department: &Department) -> Result<(), RepositoryError>;

    /// Delete a department by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the department doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Total number of departments.
    async fn count(&self) -> Result<u64, RepositoryError>;
}
