//! Path utilities for the phonebook data directory.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No terminal I/O; adapters decide how to report failures

mod database;
mod error;
mod platform;

pub use database::{DATABASE_FILE_NAME, database_path, resolve_database_path};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};
