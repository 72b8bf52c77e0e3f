/// Project persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Project, ProjectInput, ProjectStatus};
use sqlx::sqlite::SqlitePool;

const SELECT: &str = "SELECT id, name, client, proposal_id, status, budget, start_date, \
    end_date, manager_id, created_at, updated_at FROM projects";

#[derive(Debug, Clone)]
pub struct ProjectStorage {
    pool: SqlitePool,
}

impl ProjectStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<ProjectStatus>) -> StoreResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR status = ?1) ORDER BY id DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Project> {
        sqlx::query_as::<_, Project>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("project {id}")))
    }

    pub async fn create(&self, input: &ProjectInput) -> StoreResult<Project> {
        let result = sqlx::query(
            r#"
            INSERT INTO projects (name, client, proposal_id, status, budget, start_date, end_date, manager_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.name.trim())
        .bind(optional_text(&input.client))
        .bind(input.proposal_id)
        .bind(input.status)
        .bind(input.budget)
        .bind(optional_text(&input.start_date))
        .bind(optional_text(&input.end_date))
        .bind(input.manager_id)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &ProjectInput) -> StoreResult<Project> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                name = ?, client = ?, proposal_id = ?, status = ?, budget = ?,
                start_date = ?, end_date = ?, manager_id = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(optional_text(&input.client))
        .bind(input.proposal_id)
        .bind(input.status)
        .bind(input.budget)
        .bind(optional_text(&input.start_date))
        .bind(optional_text(&input.end_date))
        .bind(input.manager_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("project {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("project"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("project {id}")));
        }
        Ok(())
    }
}
