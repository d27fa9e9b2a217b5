//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, terminal, etc.).
//!
//! # Structure
//!
//! - `department` - Department nodes, upsert forms and tree nodes
//! - `contact` - Contacts, phone sets and field validation
//! - `page` - Page requests and paged result envelopes

pub mod contact;
pub mod department;
pub mod page;

// Re-export domain types at the domain level for convenience
pub use contact::{
    Contact, ContactForm, ContactIdentity, FieldError, NewContact, PhoneCategory, Phones,
    format_full_name, has_control_chars, is_valid_phone, validate_contact_form,
};
pub use department::{
    Department, DepartmentForm, DepartmentSummary, DepartmentTreeNode, NewDepartment,
};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
