//! Contact repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Contact, ContactIdentity, NewContact, Page, PageRequest};

/// Filter applied to a paged contact query.
///
/// Both filters combine with AND semantics. `department_ids == Some(vec![])`
/// matches nothing; `None` means "any department, including unassigned".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Case-insensitive substring matched against last, first or middle name.
    pub name: Option<String>,
    /// Contacts whose department is one of these IDs.
    pub department_ids: Option<Vec<i64>>,
}

impl ContactFilter {
    /// No filtering at all.
    pub const fn all() -> Self {
        Self {
            name: None,
            department_ids: None,
        }
    }

    /// Name filter only.
    pub fn by_name(query: impl Into<String>) -> Self {
        Self {
            name: Some(query.into()),
            department_ids: None,
        }
    }

    /// Department set filter only.
    pub const fn by_departments(ids: Vec<i64>) -> Self {
        Self {
            name: None,
            department_ids: Some(ids),
        }
    }

    /// Whether a contact satisfies this filter.
    ///
    /// Stores that cannot push the filter down use this directly; SQL stores
    /// must produce the same result set.
    pub fn matches(&self, contact: &Contact) -> bool {
        let name_ok = self.name.as_deref().is_none_or(|q| {
            let q = q.to_lowercase();
            [
                Some(contact.last_name.as_str()),
                Some(contact.first_name.as_str()),
                contact.middle_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&q))
        });
        let dept_ok = self.department_ids.as_ref().is_none_or(|ids| {
            contact
                .department_id
                .is_some_and(|d| ids.contains(&d))
        });
        name_ok && dept_ok
    }
}

/// Repository for contact persistence operations.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Paged reads are sorted by last, first, middle name, then ID
/// - Phone sets are read and written together with their contact
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// One page of contacts matching `filter`, plus the total match count.
    async fn find_page(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<Contact>, RepositoryError>;

    /// Get a contact by ID, including phones and department name.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the contact doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Contact, RepositoryError>;

    /// Whether a contact with this ID exists.
    async fn exists(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Whether a contact with exactly this identity tuple exists.
    async fn exists_by_identity(&self, identity: &ContactIdentity)
    -> Result<bool, RepositoryError>;

    /// Insert a contact and its phones atomically.
    async fn insert(&self, contact: &NewContact) -> Result<Contact, RepositoryError>;

    /// Overwrite a contact and replace all of its phones atomically.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the contact doesn't exist.
    async fn update(&self, id: i64, contact: &NewContact) -> Result<Contact, RepositoryError>;

    /// Delete a contact by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the contact doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Delete every contact whose ID is listed; unknown IDs are ignored.
    ///
    /// Returns the number of rows removed.
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, RepositoryError>;

    /// Total number of contacts.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Number of contacts assigned directly to a department.
    async fn count_by_department(&self, department_id: i64) -> Result<u64, RepositoryError>;
}
