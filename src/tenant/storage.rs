/// Tenant directory persistence
///
/// The master database (`{data_dir}/tenants.db`) only records which tenants
/// exist; their CRM data lives in per-tenant databases.

use crate::tenant::types::Tenant;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct TenantStorage {
    pool: SqlitePool,
}

impl TenantStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Safe to call multiple times (uses IF NOT EXISTS)
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tenants (
                id INTEGER PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a tenant; `Ok(None)` when the slug is already taken
    pub async fn create(&self, slug: &str, name: &str) -> Result<Option<Tenant>> {
        let result = sqlx::query("INSERT INTO tenants (slug, name) VALUES (?, ?) ON CONFLICT(slug) DO NOTHING")
            .bind(slug)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(slug).await
    }

    pub async fn get(&self, slug: &str) -> Result<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT id, slug, name, created_at FROM tenants WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tenant)
    }

    pub async fn list(&self) -> Result<Vec<Tenant>> {
        let tenants = sqlx::query_as::<_, Tenant>(
            "SELECT id, slug, name, created_at FROM tenants ORDER BY slug",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tenants)
    }

    /// Remove a tenant row (used to roll back a failed provisioning)
    pub async fn delete(&self, slug: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tenants WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
