//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: settings are resolved, the database is opened
//! through `phonebook-db` and the resulting `AppCore` is handed to the
//! command handlers.

use std::path::PathBuf;

use phonebook_core::services::AppCore;
use phonebook_core::{Settings, resolve_database_path, validate_settings};
use phonebook_db::{CoreFactory, setup_database};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Settings supplied on the command line or through the environment.
    pub overrides: Settings,
    /// Print JSON instead of tables.
    pub json: bool,
}

impl CliConfig {
    /// Collect configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            overrides: Settings {
                database_path: cli.database.clone(),
                default_page_size: cli.default_page_size,
                max_page_size: cli.max_page_size,
                hierarchy_max_depth: cli.hierarchy_depth,
                tree_max_depth: cli.tree_depth,
                pagination_window: None,
            },
            json: cli.json,
        }
    }

    /// Defaults merged with the overrides.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::with_defaults();
        settings.merge(&self.overrides);
        settings
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Resolved database file.
    pub database_path: PathBuf,
    /// Print JSON instead of tables.
    pub json: bool,
}

impl CliContext {
    /// Access the AppCore.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }
}

/// Bootstrap the CLI application.
///
/// Validates the settings, resolves and opens the database (creating it
/// and its schema on first use) and assembles the `AppCore`.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let settings = config.settings();
    validate_settings(&settings).map_err(|e| CliError::Config(e.to_string()))?;

    let database_path = resolve_database_path(settings.database_path.as_deref())?;
    debug!(path = %database_path.display(), "Opening phonebook database");

    let pool = setup_database(&database_path)
        .await
        .map_err(|e| CliError::Database(format!("{e:#}")))?;
    let app = CoreFactory::build_app_core(pool, settings)?;

    Ok(CliContext {
        app,
        database_path,
        json: config.json,
    })
}
