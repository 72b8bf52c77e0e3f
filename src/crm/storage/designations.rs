/// Designation (job title) persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Designation, DesignationInput};
use sqlx::sqlite::SqlitePool;

const SELECT: &str =
    "SELECT id, name, department_id, description, created_at, updated_at FROM designations";

#[derive(Debug, Clone)]
pub struct DesignationStorage {
    pool: SqlitePool,
}

impl DesignationStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, department_id: Option<i64>) -> StoreResult<Vec<Designation>> {
        let designations = sqlx::query_as::<_, Designation>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR department_id = ?1) ORDER BY name"
        ))
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(designations)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Designation> {
        sqlx::query_as::<_, Designation>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("designation {id}")))
    }

    pub async fn create(&self, input: &DesignationInput) -> StoreResult<Designation> {
        let result = sqlx::query(
            "INSERT INTO designations (name, department_id, description) VALUES (?, ?, ?)",
        )
        .bind(input.name.trim())
        .bind(input.department_id)
        .bind(optional_text(&input.description))
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &DesignationInput) -> StoreResult<Designation> {
        let result = sqlx::query(
            r#"
            UPDATE designations SET
                name = ?, department_id = ?, description = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(input.department_id)
        .bind(optional_text(&input.description))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("designation {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM designations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("designation"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("designation {id}")));
        }
        Ok(())
    }
}
