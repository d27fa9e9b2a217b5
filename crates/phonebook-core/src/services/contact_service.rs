//! Contact service - hierarchy-scoped paged queries and contact upserts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    Contact, ContactForm, ContactIdentity, Page, PageRequest, format_full_name,
    has_control_chars, validate_contact_form,
};
use crate::ports::{ContactFilter, ContactRepository, CoreError, DepartmentRepository};

use super::count_cache::{CountCache, CountKey};
use super::hierarchy::HierarchyResolver;

/// Optional filters for a contact listing, as typed by a user.
///
/// Blank text means "no name filter"; no department means "no scope".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactQuery {
    pub text: Option<String>,
    pub department_id: Option<i64>,
}

impl ContactQuery {
    /// Trimmed search text, `None` when absent or blank.
    pub fn search_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub const fn has_filters(&self) -> bool {
        self.text.is_some() || self.department_id.is_some()
    }
}

/// Page size limits applied to raw page parameters.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

/// Service for contact operations.
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
    departments: Arc<dyn DepartmentRepository>,
    hierarchy: Arc<HierarchyResolver>,
    counts: Arc<CountCache>,
    limits: PageLimits,
}

impl ContactService {
    pub fn new(
        repo: Arc<dyn ContactRepository>,
        departments: Arc<dyn DepartmentRepository>,
        hierarchy: Arc<HierarchyResolver>,
        counts: Arc<CountCache>,
        limits: PageLimits,
    ) -> Self {
        Self {
            repo,
            departments,
            hierarchy,
            counts,
            limits,
        }
    }

    /// Normalize raw page parameters with the configured size limits.
    pub fn page_request(&self, page: i64, size: i64) -> PageRequest {
        PageRequest::with_limits(page, size, self.limits.default_size, self.limits.max_size)
    }

    /// Every contact, sorted by last, first and middle name.
    pub async fn find_all(&self, page: PageRequest) -> Result<Page<Contact>, CoreError> {
        self.fetch(&ContactFilter::all(), page).await
    }

    /// Contacts whose last, first or middle name contains `query`, ignoring case.
    pub async fn search_by_name(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<Contact>, CoreError> {
        let query = require_query(query)?;
        self.fetch(&ContactFilter::by_name(query), page).await
    }

    /// Contacts of a department and all of its descendants.
    pub async fn find_by_department_scope(
        &self,
        department_id: i64,
        page: PageRequest,
    ) -> Result<Page<Contact>, CoreError> {
        let scope = self.hierarchy.scope_ids(department_id).await?;
        self.fetch(&ContactFilter::by_departments(scope), page).await
    }

    /// Name search restricted to a department subtree.
    pub async fn search_by_name_and_department_scope(
        &self,
        query: &str,
        department_id: i64,
        page: PageRequest,
    ) -> Result<Page<Contact>, CoreError> {
        let query = require_query(query)?;
        let scope = self.hierarchy.scope_ids(department_id).await?;
        let filter = ContactFilter {
            name: Some(query.to_string()),
            department_ids: Some(scope),
        };
        self.fetch(&filter, page).await
    }

    /// Dispatch a user query to the matching listing.
    pub async fn query(
        &self,
        query: &ContactQuery,
        page: PageRequest,
    ) -> Result<Page<Contact>, CoreError> {
        match (query.search_text(), query.department_id) {
            (Some(text), Some(department_id)) => {
                self.search_by_name_and_department_scope(text, department_id, page)
                    .await
            }
            (Some(text), None) => self.search_by_name(text, page).await,
            (None, Some(department_id)) => {
                self.find_by_department_scope(department_id, page).await
            }
            (None, None) => self.find_all(page).await,
        }
    }

    /// Get a contact by ID. Returns `CoreError::NotFound` if missing.
    pub async fn find_by_id(&self, id: i64) -> Result<Contact, CoreError> {
        self.repo.get_by_id(id).await.map_err(CoreError::from)
    }

    /// Whether a contact with the same (trimmed) identity already exists.
    pub async fn exists_by_identity(&self, identity: &ContactIdentity) -> Result<bool, CoreError> {
        self.repo
            .exists_by_identity(&identity.normalized())
            .await
            .map_err(CoreError::from)
    }

    /// Create (`id == None`) or overwrite a contact.
    ///
    /// Every check runs before the first write, so a rejected form leaves
    /// the store untouched. Updates replace all phone sets.
    pub async fn save(&self, form: &ContactForm) -> Result<Contact, CoreError> {
        validate_contact_form(form)?;

        if let Some(department_id) = form.department_id {
            self.departments.get_by_id(department_id).await?;
        }

        let contact = form.to_new_contact();
        let saved = match form.id {
            None => {
                if self.exists_by_identity(&form.identity()).await? {
                    return Err(CoreError::invalid(
                        "identity",
                        format!(
                            "contact '{}' with position '{}' already exists",
                            format_full_name(
                                &contact.last_name,
                                &contact.first_name,
                                contact.middle_name.as_deref()
                            ),
                            contact.position
                        ),
                    ));
                }
                self.repo.insert(&contact).await?
            }
            Some(id) => self.repo.update(id, &contact).await?,
        };

        self.counts.invalidate(CountKey::Contacts).await;
        info!(id = saved.id, name = %saved.full_name(), "Contact saved successfully");
        Ok(saved)
    }

    /// Delete one contact. Returns `CoreError::NotFound` if missing.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), CoreError> {
        self.repo.delete(id).await?;
        self.counts.invalidate(CountKey::Contacts).await;
        info!(id, "Contact deleted successfully");
        Ok(())
    }

    /// Delete every listed contact; unknown IDs are skipped.
    ///
    /// Returns the number of contacts removed.
    pub async fn delete_all_by_id(&self, ids: &[i64]) -> Result<u64, CoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let removed = self.repo.delete_many(ids).await?;
        self.counts.invalidate(CountKey::Contacts).await;
        info!(requested = ids.len(), removed, "Contacts deleted");
        Ok(removed)
    }

    /// Total number of contacts (cached until the next write).
    pub async fn count(&self) -> Result<u64, CoreError> {
        let repo = Arc::clone(&self.repo);
        self.counts
            .get_or_load(CountKey::Contacts, || async move {
                repo.count().await.map_err(CoreError::from)
            })
            .await
    }

    async fn fetch(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<Contact>, CoreError> {
        let result = self.repo.find_page(filter, page).await?;
        debug!(
            page = page.page(),
            size = page.size(),
            total = result.total_elements,
            "Contact page loaded"
        );
        Ok(result)
    }
}

fn require_query(query: &str) -> Result<&str, CoreError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CoreError::invalid("query", "must not be blank"));
    }
    if has_control_chars(query) {
        return Err(CoreError::invalid(
            "query",
            "must not contain control characters",
        ));
    }
    Ok(query)
}
