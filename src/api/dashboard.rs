/// Dashboard summary endpoint
///
/// Counts are taken over what the caller may read: a dataset without its
/// `:read` permission contributes nothing, and owner-restricted datasets are
/// filtered first.

use crate::api::error::ApiResult;
use crate::api::AuthSession;
use crate::crm::dashboard::{summarize, DashboardSummary};
use crate::crm::storage::{EmployeeStorage, LeadStorage, ProjectStorage, ProposalStorage, TaskStorage};
use crate::crm::StoreResult;
use crate::rbac::permissions::{
    DASHBOARD_READ, EMPLOYEES_READ, LEADS_READ, PROJECTS_READ, PROPOSALS_READ, TASKS_READ,
};
use crate::rbac::{has_permission, Dataset, Owned};
use axum::Json;
use std::future::Future;

async fn readable<T, F>(
    auth: &AuthSession,
    permission: &str,
    dataset: Dataset,
    load: F,
) -> StoreResult<Vec<T>>
where
    T: Owned,
    F: Future<Output = StoreResult<Vec<T>>>,
{
    if !has_permission(auth.role(), permission) {
        return Ok(Vec::new());
    }
    Ok(auth.filter(load.await?, dataset))
}

/// GET /api/dashboard
pub async fn summary(auth: AuthSession) -> ApiResult<Json<DashboardSummary>> {
    auth.require(DASHBOARD_READ)?;
    let pool = auth.pool.clone();

    let leads_store = LeadStorage::new(pool.clone());
    let proposals_store = ProposalStorage::new(pool.clone());
    let projects_store = ProjectStorage::new(pool.clone());
    let tasks_store = TaskStorage::new(pool.clone());
    let employees_store = EmployeeStorage::new(pool);

    let (leads, proposals, projects, tasks, employees) = tokio::try_join!(
        readable(&auth, LEADS_READ, Dataset::Leads, leads_store.list(None)),
        readable(&auth, PROPOSALS_READ, Dataset::Proposals, proposals_store.list(None)),
        readable(&auth, PROJECTS_READ, Dataset::Projects, projects_store.list(None)),
        readable(&auth, TASKS_READ, Dataset::Tasks, tasks_store.list(None, None)),
        readable(&auth, EMPLOYEES_READ, Dataset::Employees, employees_store.list(None, None)),
    )?;

    Ok(Json(summarize(&leads, &proposals, &projects, &tasks, &employees)))
}
