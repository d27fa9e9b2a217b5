//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_contact_repository;
mod sqlite_department_repository;

pub use sqlite_contact_repository::SqliteContactRepository;
pub use sqlite_department_repository::SqliteDepartmentRepository;
