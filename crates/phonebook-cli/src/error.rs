//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use phonebook_core::{CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A referenced department or contact does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Input was rejected by a business rule.
    #[error("{0}")]
    InvalidData(String),

    /// IO error (terminal input, output encoding).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidData(_) => 65, // EX_DATAERR
            Self::NotFound(_) => 66,    // EX_NOINPUT
            Self::Database(_) => 73,    // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
            Self::Internal(_) => 1,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(what) => Self::NotFound(format!("Not found: {what}")),
            CoreError::InvalidData { field, reason } => {
                Self::InvalidData(format!("Invalid {field}: {reason}"))
            }
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("Failed to encode JSON: {err}"))
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Io(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook_core::{RepositoryError, SettingsError};

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let not_found: CliError = CoreError::not_found("Department", 9).into();
        assert_eq!(not_found.exit_code(), 66);
        assert_eq!(not_found.to_string(), "Not found: Department with ID 9");

        let invalid: CliError = CoreError::invalid("name", "must not be blank").into();
        assert_eq!(invalid.exit_code(), 65);
        assert_eq!(invalid.to_string(), "Invalid name: must not be blank");

        let storage: CliError =
            CoreError::Repository(RepositoryError::Storage("disk full".to_string())).into();
        assert_eq!(storage.exit_code(), 73);

        let config: CliError = CoreError::Settings(SettingsError::InvalidPageSize(0)).into();
        assert_eq!(config.exit_code(), 78);
    }

    #[test]
    fn test_path_error_is_config() {
        let err: CliError = PathError::EmptyPath.into();
        assert_eq!(err.exit_code(), 78);
    }
}
