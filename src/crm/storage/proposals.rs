/// Proposal persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Proposal, ProposalInput, ProposalStatus};
use sqlx::sqlite::SqlitePool;

const SELECT: &str = "SELECT id, title, lead_id, status, amount, valid_until, assignee_id, \
    notes, created_at, updated_at FROM proposals";

#[derive(Debug, Clone)]
pub struct ProposalStorage {
    pool: SqlitePool,
}

impl ProposalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<ProposalStatus>) -> StoreResult<Vec<Proposal>> {
        let proposals = sqlx::query_as::<_, Proposal>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR status = ?1) ORDER BY id DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(proposals)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Proposal> {
        sqlx::query_as::<_, Proposal>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("proposal {id}")))
    }

    pub async fn create(&self, input: &ProposalInput) -> StoreResult<Proposal> {
        let result = sqlx::query(
            r#"
            INSERT INTO proposals (title, lead_id, status, amount, valid_until, assignee_id, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.title.trim())
        .bind(input.lead_id)
        .bind(input.status)
        .bind(input.amount)
        .bind(optional_text(&input.valid_until))
        .bind(input.assignee_id)
        .bind(optional_text(&input.notes))
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &ProposalInput) -> StoreResult<Proposal> {
        let result = sqlx::query(
            r#"
            UPDATE proposals SET
                title = ?, lead_id = ?, status = ?, amount = ?, valid_until = ?,
                assignee_id = ?, notes = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.title.trim())
        .bind(input.lead_id)
        .bind(input.status)
        .bind(input.amount)
        .bind(optional_text(&input.valid_until))
        .bind(input.assignee_id)
        .bind(optional_text(&input.notes))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("proposal {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("proposal"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("proposal {id}")));
        }
        Ok(())
    }
}
