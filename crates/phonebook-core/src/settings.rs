//! Settings domain types and validation.
//!
//! These are pure domain types with no infrastructure dependencies. Adapters
//! fill them from flags, environment variables or files and must call
//! [`validate_settings`] before handing them to `AppCore`.

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Maximum number of levels walked below a department when expanding a scope.
pub const DEFAULT_HIERARCHY_MAX_DEPTH: u32 = 10;

/// Maximum nesting materialized below a root in the forest view.
pub const DEFAULT_TREE_MAX_DEPTH: u32 = 5;

/// Pages shown on each side of the current page in pagination controls.
pub const DEFAULT_PAGINATION_WINDOW: u32 = 3;

/// Application settings structure.
///
/// All fields are optional to support partial overrides and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Location of the `SQLite` database file.
    pub database_path: Option<String>,

    /// Page size used when a request asks for an invalid size.
    pub default_page_size: Option<u32>,

    /// Largest page size a request may ask for.
    pub max_page_size: Option<u32>,

    /// Depth bound for descendant resolution.
    pub hierarchy_max_depth: Option<u32>,

    /// Depth bound for the forest view.
    pub tree_max_depth: Option<u32>,

    /// Pages shown on each side of the current page.
    pub pagination_window: Option<u32>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            database_path: None,
            default_page_size: Some(DEFAULT_PAGE_SIZE),
            max_page_size: Some(MAX_PAGE_SIZE),
            hierarchy_max_depth: Some(DEFAULT_HIERARCHY_MAX_DEPTH),
            tree_max_depth: Some(DEFAULT_TREE_MAX_DEPTH),
            pagination_window: Some(DEFAULT_PAGINATION_WINDOW),
        }
    }

    /// Get the effective default page size (with default fallback).
    #[must_use]
    pub const fn effective_default_page_size(&self) -> u32 {
        match self.default_page_size {
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        }
    }

    /// Get the effective maximum page size (with default fallback).
    #[must_use]
    pub const fn effective_max_page_size(&self) -> u32 {
        match self.max_page_size {
            Some(size) => size,
            None => MAX_PAGE_SIZE,
        }
    }

    #[must_use]
    pub const fn effective_hierarchy_max_depth(&self) -> u32 {
        match self.hierarchy_max_depth {
            Some(depth) => depth,
            None => DEFAULT_HIERARCHY_MAX_DEPTH,
        }
    }

    #[must_use]
    pub const fn effective_tree_max_depth(&self) -> u32 {
        match self.tree_max_depth {
            Some(depth) => depth,
            None => DEFAULT_TREE_MAX_DEPTH,
        }
    }

    #[must_use]
    pub const fn effective_pagination_window(&self) -> u32 {
        match self.pagination_window {
            Some(window) => window,
            None => DEFAULT_PAGINATION_WINDOW,
        }
    }

    /// Overlay another settings value, only taking fields that are `Some`.
    pub fn merge(&mut self, other: &Self) {
        if other.database_path.is_some() {
            self.database_path.clone_from(&other.database_path);
        }
        if other.default_page_size.is_some() {
            self.default_page_size = other.default_page_size;
        }
        if other.max_page_size.is_some() {
            self.max_page_size = other.max_page_size;
        }
        if other.hierarchy_max_depth.is_some() {
            self.hierarchy_max_depth = other.hierarchy_max_depth;
        }
        if other.tree_max_depth.is_some() {
            self.tree_max_depth = other.tree_max_depth;
        }
        if other.pagination_window.is_some() {
            self.pagination_window = other.pagination_window;
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Page size must be between 1 and 1,000, got {0}")]
    InvalidPageSize(u32),

    #[error("Default page size {default} exceeds maximum page size {max}")]
    DefaultExceedsMax { default: u32, max: u32 },

    #[error("Depth bound must be between 1 and 64, got {0}")]
    InvalidDepth(u32),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    for size in [settings.default_page_size, settings.max_page_size]
        .into_iter()
        .flatten()
    {
        if !(1..=1_000).contains(&size) {
            return Err(SettingsError::InvalidPageSize(size));
        }
    }

    let default = settings.effective_default_page_size();
    let max = settings.effective_max_page_size();
    if default > max {
        return Err(SettingsError::DefaultExceedsMax { default, max });
    }

    for depth in [settings.hierarchy_max_depth, settings.tree_max_depth]
        .into_iter()
        .flatten()
    {
        if !(1..=64).contains(&depth) {
            return Err(SettingsError::InvalidDepth(depth));
        }
    }

    if settings
        .database_path
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyDatabasePath);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.default_page_size, Some(20));
        assert_eq!(settings.max_page_size, Some(100));
        assert_eq!(settings.hierarchy_max_depth, Some(10));
        assert_eq!(settings.tree_max_depth, Some(5));
        assert_eq!(settings.pagination_window, Some(3));
        assert_eq!(settings.database_path, None);
    }

    #[test]
    fn test_validate_settings_valid() {
        assert!(validate_settings(&Settings::with_defaults()).is_ok());
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_effective_values_fall_back() {
        let settings = Settings::default();
        assert_eq!(settings.effective_default_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(settings.effective_max_page_size(), MAX_PAGE_SIZE);
        assert_eq!(
            settings.effective_hierarchy_max_depth(),
            DEFAULT_HIERARCHY_MAX_DEPTH
        );
        assert_eq!(settings.effective_tree_max_depth(), DEFAULT_TREE_MAX_DEPTH);
    }

    #[test]
    fn test_validate_zero_page_size() {
        let settings = Settings {
            max_page_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidPageSize(0))
        ));
    }

    #[test]
    fn test_validate_default_above_max() {
        let settings = Settings {
            default_page_size: Some(50),
            max_page_size: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::DefaultExceedsMax {
                default: 50,
                max: 10
            })
        ));
    }

    #[test]
    fn test_validate_depth() {
        let settings = Settings {
            hierarchy_max_depth: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidDepth(0))
        ));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let settings = Settings {
            database_path: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyDatabasePath)
        ));
    }

    #[test]
    fn test_merge_only_overrides_some() {
        let mut settings = Settings::with_defaults();
        settings.merge(&Settings {
            max_page_size: Some(50),
            ..Default::default()
        });
        assert_eq!(settings.max_page_size, Some(50));
        assert_eq!(settings.default_page_size, Some(20));
    }
}
