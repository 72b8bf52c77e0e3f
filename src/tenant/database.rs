/// Tenant database manager for isolated multi-tenant storage
///
/// Every tenant gets its own SQLite file under the data directory:
/// - tenants.db: the tenant directory (master database)
/// - {slug}/crm.db: that tenant's CRM records
///
/// Pools open lazily on first use and are cached for the process lifetime.

use crate::crm::schema::init_schema;
use crate::tenant::types::Tenant;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct TenantDatabaseManager {
    /// Connection pools keyed by tenant slug
    pools: RwLock<HashMap<String, SqlitePool>>,
    data_dir: PathBuf,
}

impl TenantDatabaseManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            data_dir: data_dir.into(),
        }
    }

    async fn open(path: &Path) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("open database {}", path.display()))
    }

    /// Open the master database holding the tenant directory
    pub async fn master_pool(&self) -> Result<SqlitePool> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("create data directory {}", self.data_dir.display()))?;
        let path = self.data_dir.join("tenants.db");
        tracing::info!("🗄️ Opening tenant directory: {}", path.display());
        Self::open(&path).await
    }

    /// Get or create the CRM pool for a tenant
    pub async fn tenant_pool(&self, tenant: &Tenant) -> Result<SqlitePool> {
        {
            let pools = self.pools.read().await;
            if let Some(pool) = pools.get(&tenant.slug) {
                return Ok(pool.clone());
            }
        }

        let mut pools = self.pools.write().await;

        // Another task may have opened it while we waited for the write lock
        if let Some(pool) = pools.get(&tenant.slug) {
            return Ok(pool.clone());
        }

        let db_path = self.data_dir.join(tenant.database_path());
        if let Some(dir) = db_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create tenant directory {}", dir.display()))?;
        }

        tracing::info!("🗄️ Creating tenant database pool: {}", db_path.display());
        let pool = Self::open(&db_path).await?;
        init_schema(&pool)
            .await
            .with_context(|| format!("initialize schema for tenant {}", tenant.slug))?;

        pools.insert(tenant.slug.clone(), pool.clone());
        tracing::info!("✅ Tenant database ready: {}", tenant.database_path());

        Ok(pool)
    }

    /// Close and forget a tenant pool
    pub async fn evict(&self, slug: &str) {
        if let Some(pool) = self.pools.write().await.remove(slug) {
            pool.close().await;
        }
    }

    /// Number of open tenant pools
    pub async fn open_pools(&self) -> usize {
        self.pools.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(slug: &str) -> Tenant {
        Tenant {
            id: 1,
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn pools_are_cached_and_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TenantDatabaseManager::new(dir.path());

        let acme = manager.tenant_pool(&tenant("acme")).await.unwrap();
        let again = manager.tenant_pool(&tenant("acme")).await.unwrap();
        let globex = manager.tenant_pool(&tenant("globex")).await.unwrap();
        assert_eq!(manager.open_pools().await, 2);
        assert!(dir.path().join("acme/crm.db").exists());
        assert!(dir.path().join("globex/crm.db").exists());

        sqlx::query("INSERT INTO departments (name) VALUES ('Ops')")
            .execute(&acme)
            .await
            .unwrap();
        let seen_again: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&again)
            .await
            .unwrap();
        let seen_elsewhere: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&globex)
            .await
            .unwrap();
        assert_eq!(seen_again, 1);
        assert_eq!(seen_elsewhere, 0);

        manager.evict("acme").await;
        assert_eq!(manager.open_pools().await, 1);
    }
}
