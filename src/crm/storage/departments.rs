/// Department persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Department, DepartmentInput};
use sqlx::sqlite::SqlitePool;

const SELECT: &str = "SELECT id, name, description, created_at, updated_at FROM departments";

#[derive(Debug, Clone)]
pub struct DepartmentStorage {
    pool: SqlitePool,
}

impl DepartmentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> StoreResult<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(&format!("{SELECT} ORDER BY name"))
            .fetch_all(&self.pool)
            .await?;
        Ok(departments)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Department> {
        sqlx::query_as::<_, Department>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("department {id}")))
    }

    pub async fn create(&self, input: &DepartmentInput) -> StoreResult<Department> {
        let result = sqlx::query("INSERT INTO departments (name, description) VALUES (?, ?)")
            .bind(input.name.trim())
            .bind(optional_text(&input.description))
            .execute(&self.pool)
            .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &DepartmentInput) -> StoreResult<Department> {
        let result = sqlx::query(
            "UPDATE departments SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(input.name.trim())
        .bind(optional_text(&input.description))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("department {id}")));
        }
        self.get(id).await
    }

    /// Fails with a conflict while designations or employees point at it
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("department"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("department {id}")));
        }
        Ok(())
    }
}
