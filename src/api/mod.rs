/// HTTP API layer
///
/// JSON REST endpoints under `/api/*`:
/// - tenants and auth: provisioning, login, logout, current user
/// - access: route checks for the dashboard front end
/// - CRM resources: CRUD per entity plus pipeline conversions
/// - dashboard and health

pub mod access;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod designations;
pub mod employees;
pub mod error;
pub mod extract;
pub mod health;
pub mod leads;
pub mod projects;
pub mod proposals;
pub mod tasks;
pub mod tenants;
pub mod users;

use crate::api::error::{api_internal, api_unauthorized, ApiResult};
use crate::auth::SessionStore;
use crate::config::Config;
use crate::tenant::{TenantDatabaseManager, TenantRegistry};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

pub use error::{ApiError, ErrorResponse};
pub use extract::AuthSession;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Master database holding the tenant directory
    pub master: SqlitePool,
    pub tenants: Arc<TenantRegistry>,
    pub databases: Arc<TenantDatabaseManager>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// CRM pool of a registered tenant
    pub async fn tenant_pool(&self, slug: &str) -> ApiResult<SqlitePool> {
        let tenant = self
            .tenants
            .get(slug)
            .ok_or_else(|| api_unauthorized("tenant no longer exists"))?;
        self.databases
            .tenant_pool(&tenant)
            .await
            .map_err(|err| api_internal("failed to open tenant database", &err))
    }
}

/// `{ "items": [...] }` wrapper for list endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health/db", get(health::database_health))
        .route("/api/tenants", post(tenants::create_tenant))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/access/route", get(access::check_route))
        .route("/api/dashboard", get(dashboard::summary))
        .route("/api/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/api/leads/{id}",
            get(leads::get_lead).put(leads::update_lead).delete(leads::delete_lead),
        )
        .route("/api/leads/{id}/convert", post(leads::convert_lead))
        .route(
            "/api/proposals",
            get(proposals::list_proposals).post(proposals::create_proposal),
        )
        .route(
            "/api/proposals/{id}",
            get(proposals::get_proposal)
                .put(proposals::update_proposal)
                .delete(proposals::delete_proposal),
        )
        .route("/api/proposals/{id}/convert", post(proposals::convert_proposal))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task).put(tasks::update_task).delete(tasks::delete_task),
        )
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route(
            "/api/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/api/departments/{id}",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/api/designations",
            get(designations::list_designations).post(designations::create_designation),
        )
        .route(
            "/api/designations/{id}",
            get(designations::get_designation)
                .put(designations::update_designation)
                .delete(designations::delete_designation),
        )
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
}
