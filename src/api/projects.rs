/// Project endpoints

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::storage::ProjectStorage;
use crate::crm::{Project, ProjectInput, ProjectStatus};
use crate::rbac::permissions::{PROJECTS_CREATE, PROJECTS_DELETE, PROJECTS_READ, PROJECTS_UPDATE};
use crate::rbac::Dataset;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
}

pub async fn list_projects(
    auth: AuthSession,
    query: Result<Query<ProjectFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Project>>> {
    auth.require(PROJECTS_READ)?;
    let Query(filter) = query?;
    let projects = ProjectStorage::new(auth.pool.clone()).list(filter.status).await?;
    Ok(Json(auth.filter(projects, Dataset::Projects).into()))
}

pub async fn create_project(
    auth: AuthSession,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    auth.require(PROJECTS_CREATE)?;
    let Json(input) = payload?;
    input.validate()?;
    let project = ProjectStorage::new(auth.pool.clone()).create(&input).await?;
    tracing::info!(project_id = project.id, tenant = %auth.session.tenant, "created project");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<Project>> {
    auth.require(PROJECTS_READ)?;
    let project = ProjectStorage::new(auth.pool.clone()).get(id).await?;
    Ok(Json(auth.visible(project, Dataset::Projects, "project")?))
}

pub async fn update_project(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> ApiResult<Json<Project>> {
    auth.require(PROJECTS_UPDATE)?;
    let Json(input) = payload?;
    input.validate()?;

    let storage = ProjectStorage::new(auth.pool.clone());
    auth.visible(storage.get(id).await?, Dataset::Projects, "project")?;
    Ok(Json(storage.update(id, &input).await?))
}

pub async fn delete_project(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(PROJECTS_DELETE)?;
    let storage = ProjectStorage::new(auth.pool.clone());
    auth.visible(storage.get(id).await?, Dataset::Projects, "project")?;
    storage.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
