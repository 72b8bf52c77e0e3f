/// Employee directory endpoints

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::storage::EmployeeStorage;
use crate::crm::{Employee, EmployeeInput, EmployeeStatus};
use crate::rbac::permissions::{
    EMPLOYEES_CREATE, EMPLOYEES_DELETE, EMPLOYEES_READ, EMPLOYEES_UPDATE,
};
use crate::rbac::Dataset;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
    pub department_id: Option<i64>,
}

pub async fn list_employees(
    auth: AuthSession,
    query: Result<Query<EmployeeFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Employee>>> {
    auth.require(EMPLOYEES_READ)?;
    let Query(filter) = query?;
    let employees = EmployeeStorage::new(auth.pool.clone())
        .list(filter.status, filter.department_id)
        .await?;
    Ok(Json(auth.filter(employees, Dataset::Employees).into()))
}

pub async fn create_employee(
    auth: AuthSession,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    auth.require(EMPLOYEES_CREATE)?;
    let Json(input) = payload?;
    input.validate()?;
    let employee = EmployeeStorage::new(auth.pool.clone()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get_employee(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<Employee>> {
    auth.require(EMPLOYEES_READ)?;
    let employee = EmployeeStorage::new(auth.pool.clone()).get(id).await?;
    Ok(Json(auth.visible(employee, Dataset::Employees, "employee")?))
}

pub async fn update_employee(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    auth.require(EMPLOYEES_UPDATE)?;
    let Json(input) = payload?;
    input.validate()?;
    Ok(Json(EmployeeStorage::new(auth.pool.clone()).update(id, &input).await?))
}

pub async fn delete_employee(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(EMPLOYEES_DELETE)?;
    EmployeeStorage::new(auth.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
