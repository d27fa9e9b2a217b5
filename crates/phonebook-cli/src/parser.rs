//! Main CLI parser and top-level argument handling.
//!
//! Global options double as configuration: each setting can come from a
//! flag, an environment variable or a `.env` file, in that order.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the departmental phonebook.
#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Browse and edit a departmental phonebook")]
#[command(version)]
pub struct Cli {
    /// Path to the `SQLite` database file
    #[arg(long = "db", env = "PHONEBOOK_DB", global = true)]
    pub database: Option<String>,

    /// Page size used when none (or an invalid one) is requested
    #[arg(long, env = "PHONEBOOK_DEFAULT_PAGE_SIZE", global = true)]
    pub default_page_size: Option<u32>,

    /// Largest page size a listing may request
    #[arg(long, env = "PHONEBOOK_MAX_PAGE_SIZE", global = true)]
    pub max_page_size: Option<u32>,

    /// Depth bound for department subtree resolution
    #[arg(long, env = "PHONEBOOK_HIERARCHY_DEPTH", global = true)]
    pub hierarchy_depth: Option<u32>,

    /// Depth bound for the department tree view
    #[arg(long, env = "PHONEBOOK_TREE_DEPTH", global = true)]
    pub tree_depth: Option<u32>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
