//! `SQLite` implementation of the contact repository.
//!
//! Phone numbers live in `contact_phones`. Every write that touches a
//! contact and its phones runs in one transaction, and updates replace the
//! phone rows wholesale.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use phonebook_core::ports::{ContactFilter, ContactRepository, RepositoryError};
use phonebook_core::{Contact, ContactIdentity, NewContact, Page, PageRequest, Phones};

use super::row_mappers::{
    CONTACT_FROM, CONTACT_SELECT_COLUMNS, ContactRow, PhoneRow, contains_pattern, group_phones,
    map_sqlx_error, placeholders, row_to_contact, search_key, to_u64,
};

/// `SQLite` implementation of the contact repository.
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    /// Create a new `SQLite` contact repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load phones for a set of contacts in one query.
    async fn fetch_phones(
        &self,
        contact_ids: &[i64],
    ) -> Result<HashMap<i64, Phones>, RepositoryError> {
        if contact_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT contact_id, category, number FROM contact_phones WHERE contact_id IN ({}) ORDER BY id",
            placeholders(contact_ids.len())
        );
        let mut query = sqlx::query_as::<_, PhoneRow>(&sql);
        for id in contact_ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(group_phones(rows))
    }

    async fn attach_phones(&self, rows: Vec<ContactRow>) -> Result<Vec<Contact>, RepositoryError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut phones = self.fetch_phones(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let p = phones.remove(&row.id).unwrap_or_default();
                row_to_contact(row, p)
            })
            .collect())
    }
}

/// WHERE clause and its bind values for a contact filter.
struct FilterClause {
    sql: String,
    pattern: Option<String>,
    department_ids: Vec<i64>,
}

impl FilterClause {
    fn new(filter: &ContactFilter) -> Self {
        let mut conditions = Vec::new();
        let pattern = filter.name.as_deref().map(contains_pattern);
        if pattern.is_some() {
            conditions.push(r"c.search_key LIKE ? ESCAPE '\'".to_string());
        }
        let department_ids = filter.department_ids.clone().unwrap_or_default();
        if filter.department_ids.is_some() {
            conditions.push(format!(
                "c.department_id IN ({})",
                placeholders(department_ids.len())
            ));
        }
        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        Self {
            sql,
            pattern,
            department_ids,
        }
    }
}

async fn insert_phones(
    tx: &mut Transaction<'_, Sqlite>,
    contact_id: i64,
    phones: &Phones,
) -> Result<(), RepositoryError> {
    for (category, number) in phones.iter() {
        sqlx::query("INSERT INTO contact_phones (contact_id, category, number) VALUES (?, ?, ?)")
            .bind(contact_id)
            .bind(category.as_str())
            .bind(number)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
    }
    Ok(())
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn find_page(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<Contact>, RepositoryError> {
        if filter.department_ids.as_ref().is_some_and(Vec::is_empty) {
            return Ok(Page::empty(page));
        }
        let clause = FilterClause::new(filter);

        let count_sql = format!("SELECT COUNT(*) FROM contacts c {}", clause.sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &clause.pattern {
            count_query = count_query.bind(pattern);
        }
        for id in &clause.department_ids {
            count_query = count_query.bind(id);
        }
        let total = to_u64(
            count_query
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?,
        );

        if total <= page.offset() {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let select_sql = format!(
            r#"
            SELECT {CONTACT_SELECT_COLUMNS}
            FROM {CONTACT_FROM}
            {}
            ORDER BY c.last_name, c.first_name, c.middle_name, c.id
            LIMIT ? OFFSET ?
            "#,
            clause.sql
        );
        let mut select_query = sqlx::query_as::<_, ContactRow>(&select_sql);
        if let Some(pattern) = &clause.pattern {
            select_query = select_query.bind(pattern);
        }
        for id in &clause.department_ids {
            select_query = select_query.bind(id);
        }
        let rows = select_query
            .bind(i64::from(page.size()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let items = self.attach_phones(rows).await?;
        Ok(Page::new(items, page, total))
    }

    async fn get_by_id(&self, id: i64) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {CONTACT_SELECT_COLUMNS} FROM {CONTACT_FROM} WHERE c.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| RepositoryError::NotFound(format!("Contact with ID {id}")))?;

        let mut contacts = self.attach_phones(vec![row]).await?;
        contacts
            .pop()
            .ok_or_else(|| RepositoryError::Storage(format!("Contact {id} vanished while loading")))
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM contacts WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(exists)
    }

    async fn exists_by_identity(
        &self,
        identity: &ContactIdentity,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM contacts
                WHERE last_name = ? AND first_name = ? AND middle_name IS ? AND position = ?
            )
            "#,
        )
        .bind(&identity.last_name)
        .bind(&identity.first_name)
        .bind(&identity.middle_name)
        .bind(&identity.position)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(exists)
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO contacts (last_name, first_name, middle_name, position, department_id, search_key)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contact.last_name)
        .bind(&contact.first_name)
        .bind(&contact.middle_name)
        .bind(&contact.position)
        .bind(contact.department_id)
        .bind(search_key(
            &contact.last_name,
            &contact.first_name,
            contact.middle_name.as_deref(),
        ))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        insert_phones(&mut tx, id, &contact.phones).await?;
        tx.commit().await.map_err(map_sqlx_error)?;

        self.get_by_id(id).await
    }

    async fn update(&self, id: i64, contact: &NewContact) -> Result<Contact, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET last_name = ?, first_name = ?, middle_name = ?, position = ?,
                department_id = ?, search_key = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&contact.last_name)
        .bind(&contact.first_name)
        .bind(&contact.middle_name)
        .bind(&contact.position)
        .bind(contact.department_id)
        .bind(search_key(
            &contact.last_name,
            &contact.first_name,
            contact.middle_name.as_deref(),
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Contact with ID {id}")));
        }

        // Wholesale phone replacement: delete all and re-insert
        sqlx::query("DELETE FROM contact_phones WHERE contact_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        insert_phones(&mut tx, id, &contact.phones).await?;
        tx.commit().await.map_err(map_sqlx_error)?;

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // Phones are deleted via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Contact with ID {id}")));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "DELETE FROM contacts WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let result = query.execute(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(to_u64(count))
    }

    async fn count_by_department(&self, department_id: i64) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE department_id = ?")
            .bind(department_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(to_u64(count))
    }
}
