//! Paths command handler.
//!
//! Displays the resolved database location and effective settings in
//! `key = value` format, for diagnosing configuration issues.

use serde::Serialize;

use phonebook_core::data_root;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_json;

#[derive(Serialize)]
struct PathsReport {
    data_root: String,
    database: String,
    default_page_size: u32,
    max_page_size: u32,
    hierarchy_max_depth: u32,
    tree_max_depth: u32,
}

/// Execute the paths command.
pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let settings = ctx.app().settings();
    let report = PathsReport {
        data_root: data_root()?.display().to_string(),
        database: ctx.database_path.display().to_string(),
        default_page_size: settings.effective_default_page_size(),
        max_page_size: settings.effective_max_page_size(),
        hierarchy_max_depth: settings.effective_hierarchy_max_depth(),
        tree_max_depth: settings.effective_tree_max_depth(),
    };

    if ctx.json {
        return print_json(&report);
    }

    println!("data_root = {}", report.data_root);
    println!("database = {}", report.database);
    println!("default_page_size = {}", report.default_page_size);
    println!("max_page_size = {}", report.max_page_size);
    println!("hierarchy_max_depth = {}", report.hierarchy_max_depth);
    println!("tree_max_depth = {}", report.tree_max_depth);
    Ok(())
}
