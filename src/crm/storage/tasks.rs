/// Task persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Task, TaskInput, TaskStatus};
use sqlx::sqlite::SqlitePool;

const SELECT: &str = "SELECT id, title, project_id, status, assignee_id, due_date, notes, \
    created_at, updated_at FROM tasks";

#[derive(Debug, Clone)]
pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tasks, optionally narrowed to one status and/or one project
    pub async fn list(
        &self,
        status: Option<TaskStatus>,
        project_id: Option<i64>,
    ) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR project_id = ?2) \
             ORDER BY id DESC"
        ))
        .bind(status)
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Task> {
        sqlx::query_as::<_, Task>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("task {id}")))
    }

    pub async fn create(&self, input: &TaskInput) -> StoreResult<Task> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, project_id, status, assignee_id, due_date, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.title.trim())
        .bind(input.project_id)
        .bind(input.status)
        .bind(input.assignee_id)
        .bind(optional_text(&input.due_date))
        .bind(optional_text(&input.notes))
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &TaskInput) -> StoreResult<Task> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                title = ?, project_id = ?, status = ?, assignee_id = ?, due_date = ?,
                notes = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.title.trim())
        .bind(input.project_id)
        .bind(input.status)
        .bind(input.assignee_id)
        .bind(optional_text(&input.due_date))
        .bind(optional_text(&input.notes))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("task {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("task"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("task {id}")));
        }
        Ok(())
    }
}
