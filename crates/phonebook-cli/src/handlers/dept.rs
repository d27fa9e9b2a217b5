//! Department command handlers.

use phonebook_core::DepartmentForm;

use crate::bootstrap::CliContext;
use crate::dept_commands::DeptCommand;
use crate::error::CliError;
use crate::presentation::{
    display_department_summaries, display_departments, print_json, render_tree,
};
use crate::utils::input;

/// Execute a department subcommand.
pub async fn execute(ctx: &CliContext, command: DeptCommand) -> Result<(), CliError> {
    let departments = ctx.app().departments();

    match command {
        DeptCommand::Tree => {
            let forest = ctx.app().hierarchy().build_forest().await?;
            if ctx.json {
                return print_json(&forest);
            }
            if forest.is_empty() {
                println!("No departments found.");
                println!("Use 'phonebook dept add <NAME>' to create one.");
            } else {
                print!("{}", render_tree(&forest));
            }
        }
        DeptCommand::List { roots, search } => {
            let summaries = match (roots, search) {
                (true, _) => departments.find_roots().await?,
                (false, Some(fragment)) => departments.search_by_name(&fragment).await?,
                (false, None) => departments.list_with_contact_count().await?,
            };
            if ctx.json {
                return print_json(&summaries);
            }
            display_department_summaries(&summaries);
        }
        DeptCommand::Show { id } => {
            let department = departments.get(id).await?;
            if ctx.json {
                return print_json(&department);
            }
            println!("  ID: {}", department.id);
            println!("  Name: {}", department.name);
            if let Some(parent_id) = department.parent_id {
                let parent = departments.get(parent_id).await?;
                println!("  Parent: {} (#{})", parent.name, parent.id);
            }
            println!(
                "  Created: {}",
                department.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        DeptCommand::Children { id } => {
            let children = departments.find_direct_children(id).await?;
            if ctx.json {
                return print_json(&children);
            }
            display_departments(&children);
        }
        DeptCommand::Descendants { id } => {
            let descendants = ctx.app().hierarchy().get_descendants(id).await?;
            if ctx.json {
                return print_json(&descendants);
            }
            display_departments(&descendants);
        }
        DeptCommand::Add { name, parent } => {
            let form = DepartmentForm {
                id: None,
                name,
                parent_id: parent,
            };
            let saved = departments.save(&form).await?;
            if ctx.json {
                return print_json(&saved);
            }
            println!("Department '{}' created with ID {}.", saved.name, saved.id);
        }
        DeptCommand::Update { id, name, parent } => {
            let form = DepartmentForm {
                id: Some(id),
                name,
                parent_id: parent,
            };
            let saved = departments.save(&form).await?;
            if ctx.json {
                return print_json(&saved);
            }
            println!("Department {} updated.", saved.id);
        }
        DeptCommand::Remove { id, force } => {
            let department = departments.get(id).await?;
            if !force
                && !input::prompt_confirmation(&format!(
                    "Remove department '{}' (ID {})?",
                    department.name, department.id
                ))?
            {
                println!("Remove operation cancelled.");
                return Ok(());
            }
            departments.delete_by_id(id).await?;
            println!("Department '{}' removed.", department.name);
        }
        DeptCommand::Count => {
            let count = departments.count().await?;
            if ctx.json {
                return print_json(&count);
            }
            println!("{count}");
        }
    }

    Ok(())
}
