//! Department service - upserts, guarded deletes and listings.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Department, DepartmentForm, DepartmentSummary, NewDepartment};
use crate::ports::{ContactRepository, CoreError, DepartmentRepository, RepositoryError};

use super::count_cache::{CountCache, CountKey};
use super::hierarchy::HierarchyResolver;

/// Service for department operations.
///
/// Enforces the rules the store cannot: trimmed non-blank names, no parent
/// cycles, and no deletion of departments that still have children or
/// contacts.
pub struct DepartmentService {
    repo: Arc<dyn DepartmentRepository>,
    contacts: Arc<dyn ContactRepository>,
    hierarchy: Arc<HierarchyResolver>,
    counts: Arc<CountCache>,
}

impl DepartmentService {
    pub fn new(
        repo: Arc<dyn DepartmentRepository>,
        contacts: Arc<dyn ContactRepository>,
        hierarchy: Arc<HierarchyResolver>,
        counts: Arc<CountCache>,
    ) -> Self {
        Self {
            repo,
            contacts,
            hierarchy,
            counts,
        }
    }

    /// Every department, ordered by ID, without counts.
    pub async fn list(&self) -> Result<Vec<Department>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// Every department with its direct contact count.
    pub async fn list_with_contact_count(&self) -> Result<Vec<DepartmentSummary>, CoreError> {
        self.repo
            .list_with_contact_count()
            .await
            .map_err(CoreError::from)
    }

    /// Root departments with their contact counts.
    pub async fn find_roots(&self) -> Result<Vec<DepartmentSummary>, CoreError> {
        self.repo
            .list_roots_with_contact_count()
            .await
            .map_err(CoreError::from)
    }

    /// First-level children of a department. Unknown parents have none.
    pub async fn find_direct_children(&self, parent_id: i64) -> Result<Vec<Department>, CoreError> {
        self.repo
            .list_children(parent_id)
            .await
            .map_err(CoreError::from)
    }

    /// Departments whose name contains `fragment`, ignoring case.
    ///
    /// A blank fragment matches every department.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<DepartmentSummary>, CoreError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return self.list_with_contact_count().await;
        }
        self.repo
            .search_with_contact_count(fragment)
            .await
            .map_err(CoreError::from)
    }

    /// Get a department by ID, `None` if it doesn't exist.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Department>, CoreError> {
        match self.repo.get_by_id(id).await {
            Ok(department) => Ok(Some(department)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    /// Get a department by ID. Returns `CoreError::NotFound` if missing.
    pub async fn get(&self, id: i64) -> Result<Department, CoreError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Department", id))
    }

    /// Whether a department with this (trimmed) name exists.
    pub async fn exists_by_name(&self, name: &str) -> Result<bool, CoreError> {
        self.repo
            .exists_by_name(name.trim())
            .await
            .map_err(CoreError::from)
    }

    /// Create (`id == None`) or rename/move a department.
    pub async fn save(&self, form: &DepartmentForm) -> Result<Department, CoreError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("name", "must not be blank"));
        }

        let existing = match form.id {
            Some(id) => Some(self.get(id).await?),
            None => None,
        };

        if let Some(parent_id) = form.parent_id {
            let snapshot = self.hierarchy.snapshot().await?;
            if !snapshot.contains(parent_id) {
                return Err(CoreError::NotFound(format!(
                    "Parent department with ID {parent_id}"
                )));
            }
            if let Some(id) = form.id {
                if snapshot.is_self_or_descendant(id, parent_id) {
                    return Err(CoreError::invalid(
                        "parent_id",
                        "a department cannot be placed under itself or its own subdepartment",
                    ));
                }
            }
        }

        match self.repo.get_by_name(name).await {
            Ok(other) if Some(other.id) != form.id => {
                return Err(duplicate_name(name));
            }
            Ok(_) | Err(RepositoryError::NotFound(_)) => {}
            Err(e) => return Err(CoreError::from(e)),
        }

        let saved = match existing {
            Some(mut department) => {
                department.name = name.to_string();
                department.parent_id = form.parent_id;
                self.repo
                    .update(&department)
                    .await
                    .map_err(|e| map_write_error(e, name))?;
                department
            }
            None => self
                .repo
                .insert(&NewDepartment {
                    name: name.to_string(),
                    parent_id: form.parent_id,
                })
                .await
                .map_err(|e| map_write_error(e, name))?,
        };

        self.counts.invalidate(CountKey::Departments).await;
        info!(id = saved.id, name = %saved.name, "Department saved successfully");
        Ok(saved)
    }

    /// Delete a department that has neither children nor contacts.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), CoreError> {
        self.get(id).await?;

        if !self.repo.list_children(id).await?.is_empty() {
            return Err(CoreError::invalid(
                "id",
                "cannot delete a department that has subdepartments",
            ));
        }

        if self.contacts.count_by_department(id).await? > 0 {
            return Err(CoreError::invalid(
                "id",
                "cannot delete a department that has contacts",
            ));
        }

        self.repo.delete(id).await?;
        self.counts.invalidate(CountKey::Departments).await;
        info!(id, "Department deleted successfully");
        Ok(())
    }

    /// Total number of departments (cached until the next write).
    pub async fn count(&self) -> Result<u64, CoreError> {
        let repo = Arc::clone(&self.repo);
        self.counts
            .get_or_load(CountKey::Departments, || async move {
                repo.count().await.map_err(CoreError::from)
            })
            .await
    }
}

fn duplicate_name(name: &str) -> CoreError {
    CoreError::invalid("name", format!("department '{name}' already exists"))
}

/// The store's unique index catches duplicates created concurrently.
fn map_write_error(err: RepositoryError, name: &str) -> CoreError {
    match err {
        RepositoryError::AlreadyExists(_) => duplicate_name(name),
        other => CoreError::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::MemoryStore;

    fn service(store: &Arc<MemoryStore>) -> DepartmentService {
        let hierarchy = Arc::new(HierarchyResolver::new(store.clone(), 10, 5));
        DepartmentService::new(
            store.clone(),
            store.clone(),
            hierarchy,
            Arc::new(CountCache::new()),
        )
    }

    fn form(name: &str, parent_id: Option<i64>) -> DepartmentForm {
        DepartmentForm {
            id: None,
            name: name.to_string(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_save_trims_name() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let saved = svc.save(&form("  Sales  ", None)).await.unwrap();
        assert_eq!(saved.name, "Sales");
        assert!(svc.exists_by_name(" Sales ").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_blank_name_rejected() {
        let store = MemoryStore::new();
        let err = service(&store).save(&form("   ", None)).await.unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[tokio::test]
    async fn test_save_duplicate_name_rejected() {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.save(&form("Sales", None)).await.unwrap();
        let err = svc.save(&form(" Sales", None)).await.unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[tokio::test]
    async fn test_rename_keeping_own_name_is_allowed() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let saved = svc.save(&form("Sales", None)).await.unwrap();
        let again = DepartmentForm {
            id: Some(saved.id),
            ..form("Sales", None)
        };
        assert!(svc.save(&again).await.is_ok());
    }

    #[tokio::test]
    async fn test_save_unknown_parent_is_not_found() {
        let store = MemoryStore::new();
        let err = service(&store)
            .save(&form("Sales", Some(9999)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = service(&store)
            .save(&DepartmentForm {
                id: Some(42),
                ..form("Sales", None)
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_move_under_own_descendant_rejected() {
        let store = MemoryStore::new();
        let a = store.seed_department("A", None);
        let b = store.seed_department("B", Some(a));
        let c = store.seed_department("C", Some(b));
        let svc = service(&store);

        for parent in [a, c] {
            let err = svc
                .save(&DepartmentForm {
                    id: Some(a),
                    name: "A".to_string(),
                    parent_id: Some(parent),
                })
                .await
                .unwrap_err();
            assert!(err.is_invalid_data());
        }

        // Moving a leaf elsewhere is fine.
        let d = store.seed_department("D", None);
        let moved = svc
            .save(&DepartmentForm {
                id: Some(c),
                name: "C".to_string(),
                parent_id: Some(d),
            })
            .await
            .unwrap();
        assert_eq!(moved.parent_id, Some(d));
    }

    #[tokio::test]
    async fn test_delete_with_child_rejected() {
        let store = MemoryStore::new();
        let a = store.seed_department("A", None);
        store.seed_department("B", Some(a));
        let err = service(&store).delete_by_id(a).await.unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[tokio::test]
    async fn test_delete_with_contacts_rejected() {
        let store = MemoryStore::new();
        let a = store.seed_department("A", None);
        store.seed_contact("Ivanov", "Ivan", Some(a));
        let err = service(&store).delete_by_id(a).await.unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = service(&store).delete_by_id(7).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_count_is_invalidated_by_writes() {
        let store = MemoryStore::new();
        let svc = service(&store);
        assert_eq!(svc.count().await.unwrap(), 0);

        let saved = svc.save(&form("Sales", None)).await.unwrap();
        assert_eq!(svc.count().await.unwrap(), 1);

        svc.delete_by_id(saved.id).await.unwrap();
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_listings() {
        let store = MemoryStore::new();
        let root = store.seed_department("Head Office", None);
        let child = store.seed_department("IT", Some(root));
        store.seed_department("Archive", None);
        store.seed_contact("Petrov", "Petr", Some(child));
        let svc = service(&store);

        let roots = svc.find_roots().await.unwrap();
        let names: Vec<_> = roots.iter().map(|s| s.department.name.as_str()).collect();
        assert_eq!(names, vec!["Archive", "Head Office"]);

        let children = svc.find_direct_children(root).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child);

        let found = svc.search_by_name("it").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].contact_count, 1);

        assert_eq!(svc.search_by_name("  ").await.unwrap().len(), 3);
        assert!(svc.find_by_id(999).await.unwrap().is_none());
    }
}
