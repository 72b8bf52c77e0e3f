/// Designation (job title) endpoints

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::storage::DesignationStorage;
use crate::crm::{Designation, DesignationInput};
use crate::rbac::permissions::{
    DESIGNATIONS_CREATE, DESIGNATIONS_DELETE, DESIGNATIONS_READ, DESIGNATIONS_UPDATE,
};
use crate::rbac::Dataset;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DesignationFilter {
    pub department_id: Option<i64>,
}

pub async fn list_designations(
    auth: AuthSession,
    query: Result<Query<DesignationFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Designation>>> {
    auth.require(DESIGNATIONS_READ)?;
    let Query(filter) = query?;
    let designations = DesignationStorage::new(auth.pool.clone())
        .list(filter.department_id)
        .await?;
    Ok(Json(auth.filter(designations, Dataset::Designations).into()))
}

pub async fn create_designation(
    auth: AuthSession,
    payload: Result<Json<DesignationInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Designation>)> {
    auth.require(DESIGNATIONS_CREATE)?;
    let Json(input) = payload?;
    input.validate()?;
    let designation = DesignationStorage::new(auth.pool.clone()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(designation)))
}

pub async fn get_designation(
    auth: AuthSession,
    Path(id): Path<i64>,
) -> ApiResult<Json<Designation>> {
    auth.require(DESIGNATIONS_READ)?;
    Ok(Json(DesignationStorage::new(auth.pool.clone()).get(id).await?))
}

pub async fn update_designation(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<DesignationInput>, JsonRejection>,
) -> ApiResult<Json<Designation>> {
    auth.require(DESIGNATIONS_UPDATE)?;
    let Json(input) = payload?;
    input.validate()?;
    Ok(Json(DesignationStorage::new(auth.pool.clone()).update(id, &input).await?))
}

pub async fn delete_designation(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(DESIGNATIONS_DELETE)?;
    DesignationStorage::new(auth.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
