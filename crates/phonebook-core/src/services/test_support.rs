//! In-memory repositories shared by service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Contact, ContactIdentity, Department, DepartmentSummary, NewContact, NewDepartment, Page,
    PageRequest, Phones,
};
use crate::ports::{
    ContactFilter, ContactRepository, DepartmentRepository, Repos, RepositoryError,
};

#[derive(Default)]
struct State {
    departments: Vec<Department>,
    contacts: Vec<Contact>,
    next_department_id: i64,
    next_contact_id: i64,
}

/// Both repositories over one mutex-guarded state, like a tiny database.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repos(self: &Arc<Self>) -> Repos {
        Repos::new(self.clone(), self.clone())
    }

    pub fn contact_count(&self) -> usize {
        self.state.lock().unwrap().contacts.len()
    }

    /// Insert a department row directly, bypassing service rules.
    pub fn seed_department(&self, name: &str, parent_id: Option<i64>) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_department_id += 1;
        let id = state.next_department_id;
        state.departments.push(Department {
            id,
            name: name.to_string(),
            parent_id,
            created_at: Utc::now(),
        });
        id
    }

    /// Insert a contact row directly, bypassing service rules.
    pub fn seed_contact(&self, last: &str, first: &str, department_id: Option<i64>) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_contact_id += 1;
        let id = state.next_contact_id;
        let now = Utc::now();
        state.contacts.push(Contact {
            id,
            last_name: last.to_string(),
            first_name: first.to_string(),
            middle_name: None,
            position: "Engineer".to_string(),
            department_id,
            department_name: None,
            phones: Phones::default(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    fn summaries(state: &State, keep: impl Fn(&Department) -> bool) -> Vec<DepartmentSummary> {
        let mut out: Vec<_> = state
            .departments
            .iter()
            .filter(|d| keep(d))
            .map(|d| DepartmentSummary {
                department: d.clone(),
                contact_count: state
                    .contacts
                    .iter()
                    .filter(|c| c.department_id == Some(d.id))
                    .count() as u64,
            })
            .collect();
        out.sort_by(|a, b| a.department.name.cmp(&b.department.name));
        out
    }

    fn department_name(state: &State, id: Option<i64>) -> Option<String> {
        id.and_then(|id| state.departments.iter().find(|d| d.id == id))
            .map(|d| d.name.clone())
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.state.lock().unwrap().departments.clone())
    }

    async fn list_with_contact_count(&self) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(Self::summaries(&state, |_| true))
    }

    async fn list_roots_with_contact_count(
        &self,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(Self::summaries(&state, Department::is_root))
    }

    async fn search_with_contact_count(
        &self,
        fragment: &str,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        let needle = fragment.to_lowercase();
        let state = self.state.lock().unwrap();
        Ok(Self::summaries(&state, |d| {
            d.name.to_lowercase().contains(&needle)
        }))
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<Department>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut children: Vec<_> = state
            .departments
            .iter()
            .filter(|d| d.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn get_by_id(&self, id: i64) -> Result<Department, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .departments
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Department with ID {id}")))
    }

    async fn get_by_name(&self, name: &str) -> Result<Department, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .departments
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Department '{name}'")))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.departments.iter().any(|d| d.name == name))
    }

    async fn insert(&self, department: &NewDepartment) -> Result<Department, RepositoryError> {
        if DepartmentRepository::exists_by_name(self, &department.name).await? {
            return Err(RepositoryError::AlreadyExists(department.name.clone()));
        }
        let id = self.seed_department(&department.name, department.parent_id);
        DepartmentRepository::get_by_id(self, id).await
    }

    async fn update(&self, department: &Department) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let row = state
            .departments
            .iter_mut()
            .find(|d| d.id == department.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Department with ID {}", department.id)))?;
        row.name.clone_from(&department.name);
        row.parent_id = department.parent_id;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.departments.len();
        state.departments.retain(|d| d.id != id);
        if state.departments.len() == before {
            return Err(RepositoryError::NotFound(format!("Department with ID {id}")));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.state.lock().unwrap().departments.len() as u64)
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn find_page(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<Contact>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<Contact> = state
            .contacts
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            (&a.last_name, &a.first_name, &a.middle_name, a.id).cmp(&(
                &b.last_name,
                &b.first_name,
                &b.middle_name,
                b.id,
            ))
        });
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap())
            .take(page.size() as usize)
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn get_by_id(&self, id: i64) -> Result<Contact, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .contacts
            .iter()
            .find(|c| c.id == id)
            .map(|c| Contact {
                department_name: Self::department_name(&state, c.department_id),
                ..c.clone()
            })
            .ok_or_else(|| RepositoryError::NotFound(format!("Contact with ID {id}")))
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().unwrap().contacts.iter().any(|c| c.id == id))
    }

    async fn exists_by_identity(
        &self,
        identity: &ContactIdentity,
    ) -> Result<bool, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.contacts.iter().any(|c| &c.identity() == identity))
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, RepositoryError> {
        let id = {
            let mut state = self.state.lock().unwrap();
            state.next_contact_id += 1;
            let id = state.next_contact_id;
            let now = Utc::now();
            state.contacts.push(Contact {
                id,
                last_name: contact.last_name.clone(),
                first_name: contact.first_name.clone(),
                middle_name: contact.middle_name.clone(),
                position: contact.position.clone(),
                department_id: contact.department_id,
                department_name: None,
                phones: contact.phones.clone(),
                created_at: now,
                updated_at: now,
            });
            id
        };
        ContactRepository::get_by_id(self, id).await
    }

    async fn update(&self, id: i64, contact: &NewContact) -> Result<Contact, RepositoryError> {
        {
            let mut state = self.state.lock().unwrap();
            let row = state
                .contacts
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| RepositoryError::NotFound(format!("Contact with ID {id}")))?;
            row.last_name.clone_from(&contact.last_name);
            row.first_name.clone_from(&contact.first_name);
            row.middle_name.clone_from(&contact.middle_name);
            row.position.clone_from(&contact.position);
            row.department_id = contact.department_id;
            row.phones = contact.phones.clone();
            row.updated_at = Utc::now();
        }
        ContactRepository::get_by_id(self, id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.contacts.len();
        state.contacts.retain(|c| c.id != id);
        if state.contacts.len() == before {
            return Err(RepositoryError::NotFound(format!("Contact with ID {id}")));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.contacts.len();
        state.contacts.retain(|c| !ids.contains(&c.id));
        Ok((before - state.contacts.len()) as u64)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.state.lock().unwrap().contacts.len() as u64)
    }

    async fn count_by_department(&self, department_id: i64) -> Result<u64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .contacts
            .iter()
            .filter(|c| c.department_id == Some(department_id))
            .count() as u64)
    }
}
