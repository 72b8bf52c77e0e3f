/// Lead persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Lead, LeadInput, LeadStatus};
use sqlx::sqlite::SqlitePool;

const SELECT: &str = "SELECT id, name, company, email, phone, source, status, value, \
    assignee_id, notes, created_at, updated_at FROM leads";

#[derive(Debug, Clone)]
pub struct LeadStorage {
    pool: SqlitePool,
}

impl LeadStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Newest first, optionally restricted to one pipeline stage
    pub async fn list(&self, status: Option<LeadStatus>) -> StoreResult<Vec<Lead>> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR status = ?1) ORDER BY id DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Lead> {
        sqlx::query_as::<_, Lead>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("lead {id}")))
    }

    pub async fn create(&self, input: &LeadInput) -> StoreResult<Lead> {
        let result = sqlx::query(
            r#"
            INSERT INTO leads (name, company, email, phone, source, status, value, assignee_id, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.name.trim())
        .bind(optional_text(&input.company))
        .bind(optional_text(&input.email))
        .bind(optional_text(&input.phone))
        .bind(optional_text(&input.source))
        .bind(input.status)
        .bind(input.value)
        .bind(input.assignee_id)
        .bind(optional_text(&input.notes))
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &LeadInput) -> StoreResult<Lead> {
        let result = sqlx::query(
            r#"
            UPDATE leads SET
                name = ?, company = ?, email = ?, phone = ?, source = ?,
                status = ?, value = ?, assignee_id = ?, notes = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(optional_text(&input.company))
        .bind(optional_text(&input.email))
        .bind(optional_text(&input.phone))
        .bind(optional_text(&input.source))
        .bind(input.status)
        .bind(input.value)
        .bind(input.assignee_id)
        .bind(optional_text(&input.notes))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("lead {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("lead"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("lead {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::schema::memory_pool;

    fn input(name: &str, status: LeadStatus) -> LeadInput {
        LeadInput {
            name: name.to_string(),
            company: Some("  Acme  ".to_string()),
            email: Some("buyer@acme.test".to_string()),
            phone: Some(String::new()),
            source: None,
            status,
            value: 1200.5,
            assignee_id: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let storage = LeadStorage::new(memory_pool().await);
        let created = storage.create(&input("Acme deal", LeadStatus::Qualified)).await.unwrap();
        let fetched = storage.get(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "Acme deal");
        assert_eq!(fetched.company.as_deref(), Some("Acme"));
        assert_eq!(fetched.phone, None);
        assert_eq!(fetched.status, LeadStatus::Qualified);
        assert_eq!(fetched.value, 1200.5);
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let storage = LeadStorage::new(memory_pool().await);
        storage.create(&input("a", LeadStatus::New)).await.unwrap();
        storage.create(&input("b", LeadStatus::Won)).await.unwrap();
        storage.create(&input("c", LeadStatus::New)).await.unwrap();

        assert_eq!(storage.list(None).await.unwrap().len(), 3);
        let new: Vec<_> = storage
            .list(Some(LeadStatus::New))
            .await
            .unwrap()
            .into_iter()
            .map(|lead| lead.name)
            .collect();
        assert_eq!(new, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_report_not_found() {
        let storage = LeadStorage::new(memory_pool().await);
        let missing = storage.update(99, &input("x", LeadStatus::New)).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
        assert!(matches!(storage.delete(99).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_assignee_is_an_invalid_reference() {
        let storage = LeadStorage::new(memory_pool().await);
        let mut lead = input("Orphan", LeadStatus::New);
        lead.assignee_id = Some(404);
        assert!(matches!(
            storage.create(&lead).await,
            Err(StoreError::InvalidReference(_))
        ));
    }
}
