//! Core domain, ports and services of the phonebook.
//!
//! Departments form a forest; contacts optionally belong to one department.
//! The central operations resolve a department's full subtree from a single
//! bulk read and use it to scope paged contact queries.
//!
//! This crate has no storage dependency. Adapters implement the traits in
//! [`ports`] and hand them to [`AppCore`] through a [`Repos`] container.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Contact, ContactForm, ContactIdentity, DEFAULT_PAGE_SIZE, Department, DepartmentForm,
    DepartmentSummary, DepartmentTreeNode, FieldError, MAX_PAGE_SIZE, NewContact, NewDepartment,
    Page, PageRequest, PhoneCategory, Phones, format_full_name, is_valid_phone,
    validate_contact_form,
};
pub use ports::{
    ContactFilter, ContactRepository, CoreError, DepartmentRepository, Repos, RepositoryError,
};
pub use services::{
    AppCore, ContactQuery, ContactService, CountCache, CountKey, DepartmentService,
    DescendantWalk, HierarchyResolver, HierarchySnapshot, PageLimits,
};
pub use settings::{
    DEFAULT_HIERARCHY_MAX_DEPTH, DEFAULT_PAGINATION_WINDOW, DEFAULT_TREE_MAX_DEPTH, Settings,
    SettingsError, validate_settings,
};

// Re-export path utilities
pub use paths::{
    DATA_DIR_ENV, DATABASE_FILE_NAME, PathError, data_root, database_path, normalize_user_path,
    resolve_database_path,
};
