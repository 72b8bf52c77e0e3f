/// Department endpoints
///
/// Deleting a department that still has designations or employees is a 409.

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::storage::DepartmentStorage;
use crate::crm::{Department, DepartmentInput};
use crate::rbac::permissions::{
    DEPARTMENTS_CREATE, DEPARTMENTS_DELETE, DEPARTMENTS_READ, DEPARTMENTS_UPDATE,
};
use crate::rbac::Dataset;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;

pub async fn list_departments(auth: AuthSession) -> ApiResult<Json<ListResponse<Department>>> {
    auth.require(DEPARTMENTS_READ)?;
    let departments = DepartmentStorage::new(auth.pool.clone()).list().await?;
    Ok(Json(auth.filter(departments, Dataset::Departments).into()))
}

pub async fn create_department(
    auth: AuthSession,
    payload: Result<Json<DepartmentInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    auth.require(DEPARTMENTS_CREATE)?;
    let Json(input) = payload?;
    input.validate()?;
    let department = DepartmentStorage::new(auth.pool.clone()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn get_department(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<Department>> {
    auth.require(DEPARTMENTS_READ)?;
    Ok(Json(DepartmentStorage::new(auth.pool.clone()).get(id).await?))
}

pub async fn update_department(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<DepartmentInput>, JsonRejection>,
) -> ApiResult<Json<Department>> {
    auth.require(DEPARTMENTS_UPDATE)?;
    let Json(input) = payload?;
    input.validate()?;
    Ok(Json(DepartmentStorage::new(auth.pool.clone()).update(id, &input).await?))
}

pub async fn delete_department(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(DEPARTMENTS_DELETE)?;
    DepartmentStorage::new(auth.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
