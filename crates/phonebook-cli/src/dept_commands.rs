//! Department subcommands.

use clap::Subcommand;

/// Department management commands.
#[derive(Subcommand)]
pub enum DeptCommand {
    /// Show the department forest
    Tree,

    /// List departments with their direct contact counts
    List {
        /// Only root departments
        #[arg(long, conflicts_with = "search")]
        roots: bool,
        /// Case-insensitive name fragment
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single department
    Show {
        /// Department ID
        id: i64,
    },

    /// List the direct children of a department
    Children {
        /// Department ID
        id: i64,
    },

    /// List every department below a department
    Descendants {
        /// Department ID
        id: i64,
    },

    /// Create a department
    Add {
        /// Department name (unique)
        name: String,
        /// Parent department ID
        #[arg(short, long)]
        parent: Option<i64>,
    },

    /// Rename or move a department
    Update {
        /// Department ID
        id: i64,
        /// New department name
        name: String,
        /// New parent department ID (omit to make it a root)
        #[arg(short, long)]
        parent: Option<i64>,
    },

    /// Remove an empty department
    Remove {
        /// Department ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show the number of departments
    Count,
}
