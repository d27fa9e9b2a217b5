//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters receive an
//! `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{CoreError, Repos};
use crate::settings::{Settings, validate_settings};

use super::{
    ContactService, CountCache, DepartmentService, HierarchyResolver, PageLimits,
};

/// The core application facade.
///
/// Constructed at the adapter's composition root with concrete repository
/// implementations. All services share one [`CountCache`].
///
/// # Example
///
/// ```ignore
/// let repos = CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, Settings::with_defaults())?;
///
/// let forest = core.hierarchy().build_forest().await?;
/// ```
pub struct AppCore {
    settings: Settings,
    hierarchy: Arc<HierarchyResolver>,
    departments: DepartmentService,
    contacts: ContactService,
}

impl AppCore {
    /// Wire services over `repos`. Fails if `settings` don't validate.
    pub fn new(repos: Repos, settings: Settings) -> Result<Self, CoreError> {
        validate_settings(&settings)?;

        let counts = Arc::new(CountCache::new());
        let hierarchy = Arc::new(HierarchyResolver::new(
            Arc::clone(&repos.departments),
            settings.effective_hierarchy_max_depth(),
            settings.effective_tree_max_depth(),
        ));
        let departments = DepartmentService::new(
            Arc::clone(&repos.departments),
            Arc::clone(&repos.contacts),
            Arc::clone(&hierarchy),
            Arc::clone(&counts),
        );
        let contacts = ContactService::new(
            repos.contacts,
            repos.departments,
            Arc::clone(&hierarchy),
            counts,
            PageLimits {
                default_size: settings.effective_default_page_size(),
                max_size: settings.effective_max_page_size(),
            },
        );

        Ok(Self {
            settings,
            hierarchy,
            departments,
            contacts,
        })
    }

    /// Access the effective settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Access the hierarchy resolver.
    pub fn hierarchy(&self) -> &HierarchyResolver {
        &self.hierarchy
    }

    /// Access the department service.
    pub const fn departments(&self) -> &DepartmentService {
        &self.departments
    }

    /// Access the contact service.
    pub const fn contacts(&self) -> &ContactService {
        &self.contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactForm, DepartmentForm};
    use crate::services::test_support::MemoryStore;

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let store = MemoryStore::new();
        let settings = Settings {
            max_page_size: Some(0),
            ..Settings::default()
        };
        let err = AppCore::new(store.repos(), settings).err().unwrap();
        assert!(matches!(err, CoreError::Settings(_)));
    }

    #[tokio::test]
    async fn test_configured_page_limits_apply() {
        let store = MemoryStore::new();
        let settings = Settings {
            default_page_size: Some(5),
            max_page_size: Some(10),
            ..Settings::default()
        };
        let core = AppCore::new(store.repos(), settings).unwrap();
        assert_eq!(core.contacts().page_request(0, 50).size(), 5);
        assert_eq!(core.contacts().page_request(0, 10).size(), 10);
    }

    #[tokio::test]
    async fn test_configured_depth_limits_apply() {
        let store = MemoryStore::new();
        let mut parent = None;
        let mut ids = Vec::new();
        for i in 0..6 {
            let id = store.seed_department(&format!("L{i}"), parent);
            ids.push(id);
            parent = Some(id);
        }
        let settings = Settings {
            hierarchy_max_depth: Some(2),
            tree_max_depth: Some(1),
            ..Settings::default()
        };
        let core = AppCore::new(store.repos(), settings).unwrap();

        let descendants = core.hierarchy().get_descendants(ids[0]).await.unwrap();
        assert_eq!(descendants.len(), 2);

        let forest = core.hierarchy().build_forest().await.unwrap();
        assert_eq!(forest[0].depth(), 1);
    }

    #[tokio::test]
    async fn test_services_share_one_store() {
        let store = MemoryStore::new();
        let core = AppCore::new(store.repos(), Settings::with_defaults()).unwrap();

        let dept = core
            .departments()
            .save(&DepartmentForm {
                id: None,
                name: "Support".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        core.contacts()
            .save(&ContactForm {
                last_name: "Sidorov".to_string(),
                first_name: "Sidor".to_string(),
                position: "Operator".to_string(),
                department_id: Some(dept.id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(core.departments().delete_by_id(dept.id).await.is_err());
        assert_eq!(core.contacts().count().await.unwrap(), 1);
        assert_eq!(core.departments().count().await.unwrap(), 1);
    }
}
