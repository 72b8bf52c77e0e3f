/// Tenant management
///
/// Handles the tenant directory and per-tenant database isolation.
/// Each tenant gets its own SQLite file: {data_dir}/{slug}/crm.db

pub mod database;
pub mod registry;
pub mod storage;
pub mod types;

pub use database::TenantDatabaseManager;
pub use registry::TenantRegistry;
pub use storage::TenantStorage;
pub use types::Tenant;
