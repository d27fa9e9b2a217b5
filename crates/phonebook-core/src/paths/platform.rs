//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PHONEBOOK_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `PHONEBOOK_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/phonebook`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return normalize_user_path(&path);
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("phonebook");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(
            normalize_user_path("   "),
            Err(PathError::EmptyPath)
        ));
    }

    #[test]
    fn test_normalize_keeps_absolute() {
        let path = normalize_user_path("/tmp/phonebook.db").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/phonebook.db"));
    }

    #[test]
    fn test_normalize_makes_relative_absolute() {
        let path = normalize_user_path("phonebook.db").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("phonebook.db"));
    }
}
