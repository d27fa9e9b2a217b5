//! Contact subcommands.

use clap::{Args, Subcommand};
use phonebook_core::{ContactForm, Phones};

/// Contact management commands.
#[derive(Subcommand)]
pub enum ContactCommand {
    /// List contacts, optionally filtered by name and department subtree
    List {
        /// Case-insensitive fragment of the last, first or middle name
        #[arg(short, long)]
        query: Option<String>,
        /// Restrict to this department and everything below it
        #[arg(short, long)]
        department: Option<i64>,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: i64,
        /// Page size (0 uses the configured default)
        #[arg(short, long, default_value_t = 0)]
        size: i64,
    },

    /// Show a single contact
    Show {
        /// Contact ID
        id: i64,
    },

    /// Create a contact
    Add(ContactArgs),

    /// Replace a contact's fields and phone numbers
    Update {
        /// Contact ID
        id: i64,
        #[command(flatten)]
        args: ContactArgs,
    },

    /// Remove one or more contacts
    Remove {
        /// Contact IDs
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show the number of contacts
    Count,
}

/// Editable contact fields.
#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    /// Last name
    #[arg(long)]
    pub last: String,
    /// First name
    #[arg(long)]
    pub first: String,
    /// Middle name
    #[arg(long)]
    pub middle: Option<String>,
    /// Job title
    #[arg(long)]
    pub position: String,
    /// Department ID
    #[arg(short, long)]
    pub department: Option<i64>,
    /// Work phone (repeatable)
    #[arg(long = "work")]
    pub work_phones: Vec<String>,
    /// Work mobile phone (repeatable)
    #[arg(long = "mobile")]
    pub work_mobile_phones: Vec<String>,
    /// Personal phone (repeatable)
    #[arg(long = "personal")]
    pub personal_phones: Vec<String>,
}

impl ContactArgs {
    /// Build the upsert form, `id` selecting update over create.
    pub fn into_form(self, id: Option<i64>) -> ContactForm {
        ContactForm {
            id,
            last_name: self.last,
            first_name: self.first,
            middle_name: self.middle.filter(|m| !m.trim().is_empty()),
            position: self.position,
            department_id: self.department,
            phones: Phones {
                work: self.work_phones.into_iter().collect(),
                work_mobile: self.work_mobile_phones.into_iter().collect(),
                personal: self.personal_phones.into_iter().collect(),
            },
        }
    }
}
