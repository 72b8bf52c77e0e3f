/// Task endpoints
///
/// Staff and plain users work only with tasks assigned to them.

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::storage::TaskStorage;
use crate::crm::{Task, TaskInput, TaskStatus};
use crate::rbac::permissions::{TASKS_CREATE, TASKS_DELETE, TASKS_READ, TASKS_UPDATE};
use crate::rbac::Dataset;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub project_id: Option<i64>,
}

pub async fn list_tasks(
    auth: AuthSession,
    query: Result<Query<TaskFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Task>>> {
    auth.require(TASKS_READ)?;
    let Query(filter) = query?;
    let tasks = TaskStorage::new(auth.pool.clone())
        .list(filter.status, filter.project_id)
        .await?;
    Ok(Json(auth.filter(tasks, Dataset::Tasks).into()))
}

pub async fn create_task(
    auth: AuthSession,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    auth.require(TASKS_CREATE)?;
    let Json(mut input) = payload?;
    input.validate()?;
    input.assignee_id = auth.default_owner(input.assignee_id, Dataset::Tasks);

    let task = TaskStorage::new(auth.pool.clone()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<Task>> {
    auth.require(TASKS_READ)?;
    let task = TaskStorage::new(auth.pool.clone()).get(id).await?;
    Ok(Json(auth.visible(task, Dataset::Tasks, "task")?))
}

pub async fn update_task(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    auth.require(TASKS_UPDATE)?;
    let Json(mut input) = payload?;
    input.validate()?;

    let storage = TaskStorage::new(auth.pool.clone());
    let current = auth.visible(storage.get(id).await?, Dataset::Tasks, "task")?;
    input.assignee_id = auth.keep_owner(input.assignee_id, &current, Dataset::Tasks);
    Ok(Json(storage.update(id, &input).await?))
}

pub async fn delete_task(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(TASKS_DELETE)?;
    let storage = TaskStorage::new(auth.pool.clone());
    auth.visible(storage.get(id).await?, Dataset::Tasks, "task")?;
    storage.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
