/// leadline: multi-tenant CRM backend
///
/// Leads, proposals, projects, tasks and the people directory behind a JSON
/// API, one SQLite database per tenant, with role-based access control on
/// every route and every row.

// Core configuration and setup
pub mod config;

// Role-based access control: permission table, route rules, row filters
pub mod rbac;

// Password hashing and bearer-token sessions
pub mod auth;

// Tenant directory and per-tenant database isolation
pub mod tenant;

// CRM records, validation and storage
pub mod crm;

// HTTP API layer
pub mod api;

// Server setup and initialization
pub mod server;

pub use api::AppState;
pub use config::Config;
pub use server::{create_app, create_state, start_server};
