//! Database path resolution.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, normalize_user_path};

/// File name of the phonebook database inside the data root.
pub const DATABASE_FILE_NAME: &str = "phonebook.db";

/// Get the default path to the phonebook database file.
///
/// The parent directory is created if it doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    let root = data_root()?;

    fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
        path: root.clone(),
        reason: e.to_string(),
    })?;

    Ok(root.join(DATABASE_FILE_NAME))
}

/// Resolve the database file, preferring an explicit override.
pub fn resolve_database_path(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    match explicit {
        Some(raw) => {
            let path = normalize_user_path(raw)?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| PathError::CreateFailed {
                    path: parent.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
            Ok(path)
        }
        None => database_path(),
    }
}
