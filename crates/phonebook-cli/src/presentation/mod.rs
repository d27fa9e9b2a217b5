//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms. Every command can
//! print either a table or, with `--json`, the serialized core value.

pub mod contact_display;
pub mod tables;

use serde::Serialize;

use crate::error::CliError;

// Re-export commonly used items
pub use contact_display::{
    display_contact, display_contact_page, display_department_summaries, display_departments,
};
pub use tables::{
    format_optional, pagination_window, print_separator, render_pager, render_tree,
    truncate_string,
};

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
