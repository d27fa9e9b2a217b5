//! Main commands enum.

use clap::Subcommand;

use crate::contact_commands::ContactCommand;
use crate::dept_commands::DeptCommand;

/// Top-level commands of the phonebook tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Browse and edit the department hierarchy
    Dept {
        #[command(subcommand)]
        command: DeptCommand,
    },

    /// Browse and edit contacts
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },

    /// Show resolved paths and effective settings
    Paths,
}
