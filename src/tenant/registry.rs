/// Lock-free tenant directory using ArcSwap
///
/// Request handlers resolve tenants on every call, so reads go through an
/// atomically swapped snapshot. Writes clone the map, change it and swap the
/// pointer.

use crate::tenant::{storage::TenantStorage, types::Tenant};
use anyhow::Result;
use arc_swap::ArcSwap;
use std::{collections::HashMap, sync::Arc};

#[derive(Debug)]
pub struct TenantRegistry {
    /// Key: tenant slug
    tenants: ArcSwap<HashMap<String, Tenant>>,
    storage: TenantStorage,
}

impl TenantRegistry {
    pub fn new(storage: TenantStorage) -> Self {
        Self {
            tenants: ArcSwap::new(Arc::new(HashMap::new())),
            storage,
        }
    }

    /// Load every tenant from the master database
    pub async fn init_from_storage(&self) -> Result<()> {
        let tenants = self.storage.list().await?;
        let map = tenants
            .into_iter()
            .map(|tenant| (tenant.slug.clone(), tenant))
            .collect::<HashMap<_, _>>();
        self.tenants.store(Arc::new(map));

        tracing::info!("Initialized tenant registry with {} tenants", self.tenants.load().len());
        Ok(())
    }

    /// Persist a new tenant and publish it; `Ok(None)` if the slug exists
    pub async fn register(&self, slug: &str, name: &str) -> Result<Option<Tenant>> {
        let Some(tenant) = self.storage.create(slug, name).await? else {
            return Ok(None);
        };

        let current = self.tenants.load();
        let mut next = (**current).clone();
        next.insert(tenant.slug.clone(), tenant.clone());
        self.tenants.store(Arc::new(next));

        tracing::info!("Registered tenant: {} ({})", tenant.slug, tenant.name);
        Ok(Some(tenant))
    }

    /// Forget a tenant in storage and in the published snapshot
    pub async fn unregister(&self, slug: &str) -> Result<()> {
        self.storage.delete(slug).await?;

        let current = self.tenants.load();
        let mut next = (**current).clone();
        if next.remove(slug).is_some() {
            self.tenants.store(Arc::new(next));
            tracing::info!("Removed tenant from registry: {}", slug);
        }
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<Tenant> {
        self.tenants.load().get(slug).cloned()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.tenants.load().contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.tenants.load().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn storage() -> TenantStorage {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let storage = TenantStorage::new(pool);
        storage.init_schema().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn register_publishes_and_rejects_duplicates() {
        let registry = TenantRegistry::new(storage().await);
        assert!(registry.get("acme").is_none());

        let acme = registry.register("acme", "Acme").await.unwrap().unwrap();
        assert_eq!(registry.get("acme"), Some(acme));
        assert!(registry.register("acme", "Other").await.unwrap().is_none());
        assert_eq!(registry.len(), 1);

        registry.unregister("acme").await.unwrap();
        assert!(!registry.contains("acme"));
    }

    #[tokio::test]
    async fn init_loads_existing_rows() {
        let storage = storage().await;
        storage.create("globex", "Globex").await.unwrap();
        storage.create("initech", "Initech").await.unwrap();

        let registry = TenantRegistry::new(storage);
        registry.init_from_storage().await.unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("initech"));
    }
}
