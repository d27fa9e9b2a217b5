//! Command-line adapter for the phonebook.
//!
//! `bootstrap` is the composition root: it resolves settings, opens the
//! `SQLite` database and hands an `AppCore` to the command handlers.
//! Handlers stay thin and format whatever the core returns.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary entry point
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod contact_commands;
pub mod dept_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use contact_commands::{ContactArgs, ContactCommand};
pub use dept_commands::DeptCommand;
pub use error::CliError;
pub use parser::Cli;
