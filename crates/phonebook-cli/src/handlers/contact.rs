//! Contact command handlers.

use phonebook_core::ContactQuery;

use crate::bootstrap::CliContext;
use crate::contact_commands::ContactCommand;
use crate::error::CliError;
use crate::presentation::{display_contact, display_contact_page, print_json};
use crate::utils::input;

/// Execute a contact subcommand.
pub async fn execute(ctx: &CliContext, command: ContactCommand) -> Result<(), CliError> {
    let contacts = ctx.app().contacts();

    match command {
        ContactCommand::List {
            query,
            department,
            page,
            size,
        } => {
            let request = contacts.page_request(page.saturating_sub(1), size);
            let query = ContactQuery {
                text: query,
                department_id: department,
            };
            let result = contacts.query(&query, request).await?;
            if ctx.json {
                return print_json(&result);
            }
            display_contact_page(&result, ctx.app().settings().effective_pagination_window());
        }
        ContactCommand::Show { id } => {
            let contact = contacts.find_by_id(id).await?;
            if ctx.json {
                return print_json(&contact);
            }
            display_contact(&contact);
        }
        ContactCommand::Add(args) => {
            let saved = contacts.save(&args.into_form(None)).await?;
            if ctx.json {
                return print_json(&saved);
            }
            println!("Contact '{}' created with ID {}.", saved.full_name(), saved.id);
        }
        ContactCommand::Update { id, args } => {
            let saved = contacts.save(&args.into_form(Some(id))).await?;
            if ctx.json {
                return print_json(&saved);
            }
            println!("Contact {} updated.", saved.id);
        }
        ContactCommand::Remove { ids, force } => {
            if let [id] = ids.as_slice() {
                let contact = contacts.find_by_id(*id).await?;
                if !force
                    && !input::prompt_confirmation(&format!(
                        "Remove contact '{}' (ID {})?",
                        contact.full_name(),
                        contact.id
                    ))?
                {
                    println!("Remove operation cancelled.");
                    return Ok(());
                }
                contacts.delete_by_id(*id).await?;
                println!("Contact '{}' removed.", contact.full_name());
            } else {
                if !force
                    && !input::prompt_confirmation(&format!("Remove {} contacts?", ids.len()))?
                {
                    println!("Remove operation cancelled.");
                    return Ok(());
                }
                let removed = contacts.delete_all_by_id(&ids).await?;
                println!("Removed {removed} contact(s).");
            }
        }
        ContactCommand::Count => {
            let count = contacts.count().await?;
            if ctx.json {
                return print_json(&count);
            }
            println!("{count}");
        }
    }

    Ok(())
}
