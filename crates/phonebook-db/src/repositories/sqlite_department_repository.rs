//! `SQLite` implementation of the department repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use phonebook_core::ports::{DepartmentRepository, RepositoryError};
use phonebook_core::{Department, DepartmentSummary, NewDepartment};

use super::row_mappers::{
    DEPARTMENT_SELECT_COLUMNS, DepartmentRow, DepartmentSummaryRow, contains_pattern,
    map_sqlx_error, to_u64,
};

/// `SQLite` implementation of the department repository.
pub struct SqliteDepartmentRepository {
    pool: SqlitePool,
}

impl SqliteDepartmentRepository {
    /// Create a new `SQLite` department repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Departments with direct contact counts, filtered by `condition`.
    async fn summaries(
        &self,
        condition: &str,
        pattern: Option<&str>,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {DEPARTMENT_SELECT_COLUMNS}, COUNT(c.id) AS contact_count
            FROM departments d
            LEFT JOIN contacts c ON c.department_id = d.id
            WHERE {condition}
            GROUP BY d.id
            ORDER BY d.name, d.id
            "#
        );
        let mut query = sqlx::query_as::<_, DepartmentSummaryRow>(&sql);
        if let Some(pattern) = pattern {
            query = query.bind(pattern);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(DepartmentSummary::from).collect())
    }
}

#[async_trait]
impl DepartmentRepository for SqliteDepartmentRepository {
    async fn list(&self) -> Result<Vec<Department>, RepositoryError> {
        let rows = sqlx::query_as::<_, DepartmentRow>(&format!(
            "SELECT {DEPARTMENT_SELECT_COLUMNS} FROM departments d ORDER BY d.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Department::from).collect())
    }

    async fn list_with_contact_count(&self) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        self.summaries("1 = 1", None).await
    }

    async fn list_roots_with_contact_count(
        &self,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        self.summaries("d.parent_id IS NULL", None).await
    }

    async fn search_with_contact_count(
        &self,
        fragment: &str,
    ) -> Result<Vec<DepartmentSummary>, RepositoryError> {
        let pattern = contains_pattern(fragment);
        self.summaries(r"d.name_key LIKE ? ESCAPE '\'", Some(&pattern))
            .await
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<Department>, RepositoryError> {
        let rows = sqlx::query_as::<_, DepartmentRow>(&format!(
            "SELECT {DEPARTMENT_SELECT_COLUMNS} FROM departments d WHERE d.parent_id = ? ORDER BY d.name, d.id"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Department::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Department, RepositoryError> {
        sqlx::query_as::<_, DepartmentRow>(&format!(
            "SELECT {DEPARTMENT_SELECT_COLUMNS} FROM departments d WHERE d.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .map(Department::from)
        .ok_or_else(|| RepositoryError::NotFound(format!("Department with ID {id}")))
    }

    async fn get_by_name(&self, name: &str) -> Result<Department, RepositoryError> {
        sqlx::query_as::<_, DepartmentRow>(&format!(
            "SELECT {DEPARTMENT_SELECT_COLUMNS} FROM departments d WHERE d.name = ?"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .map(Department::from)
        .ok_or_else(|| RepositoryError::NotFound(format!("Department '{name}'")))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE name = ?)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(exists)
    }

    async fn insert(&self, department: &NewDepartment) -> Result<Department, RepositoryError> {
        let result =
            sqlx::query("INSERT INTO departments (name, name_key, parent_id) VALUES (?, ?, ?)")
                .bind(&department.name)
                .bind(department.name.to_lowercase())
                .bind(department.parent_id)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn update(&self, department: &Department) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE departments SET name = ?, name_key = ?, parent_id = ? WHERE id = ?")
                .bind(&department.name)
                .bind(department.name.to_lowercase())
                .bind(department.parent_id)
                .bind(department.id)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Department with ID {}",
                department.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Department with ID {id}")));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(to_u64(count))
    }
}
