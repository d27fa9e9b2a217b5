//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod app_core;
mod contact_service;
mod count_cache;
mod department_service;
mod hierarchy;

#[cfg(test)]
mod test_support;

pub use app_core::AppCore;
pub use contact_service::{ContactQuery, ContactService, PageLimits};
pub use count_cache::{CountCache, CountKey};
pub use department_service::DepartmentService;
pub use hierarchy::{DescendantWalk, HierarchyResolver, HierarchySnapshot};
