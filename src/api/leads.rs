/// Lead endpoints
///
/// Staff only see leads assigned to them; a lead they cannot see answers 404
/// on every per-id route.

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::pipeline;
use crate::crm::storage::LeadStorage;
use crate::crm::{Lead, LeadInput, LeadStatus, Proposal};
use crate::rbac::permissions::{
    LEADS_CREATE, LEADS_DELETE, LEADS_READ, LEADS_UPDATE, PROPOSALS_CREATE,
};
use crate::rbac::Dataset;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
}

/// GET /api/leads?status=
pub async fn list_leads(
    auth: AuthSession,
    query: Result<Query<LeadFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Lead>>> {
    auth.require(LEADS_READ)?;
    let Query(filter) = query?;
    let leads = LeadStorage::new(auth.pool.clone()).list(filter.status).await?;
    Ok(Json(auth.filter(leads, Dataset::Leads).into()))
}

/// POST /api/leads
pub async fn create_lead(
    auth: AuthSession,
    payload: Result<Json<LeadInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Lead>)> {
    auth.require(LEADS_CREATE)?;
    let Json(mut input) = payload?;
    input.validate()?;
    input.assignee_id = auth.default_owner(input.assignee_id, Dataset::Leads);

    let lead = LeadStorage::new(auth.pool.clone()).create(&input).await?;
    tracing::info!(lead_id = lead.id, tenant = %auth.session.tenant, "created lead");
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/leads/{id}
pub async fn get_lead(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<Lead>> {
    auth.require(LEADS_READ)?;
    let lead = LeadStorage::new(auth.pool.clone()).get(id).await?;
    Ok(Json(auth.visible(lead, Dataset::Leads, "lead")?))
}

/// PUT /api/leads/{id}
pub async fn update_lead(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<LeadInput>, JsonRejection>,
) -> ApiResult<Json<Lead>> {
    auth.require(LEADS_UPDATE)?;
    let Json(mut input) = payload?;
    input.validate()?;

    let storage = LeadStorage::new(auth.pool.clone());
    let current = auth.visible(storage.get(id).await?, Dataset::Leads, "lead")?;
    input.assignee_id = auth.keep_owner(input.assignee_id, &current, Dataset::Leads);
    Ok(Json(storage.update(id, &input).await?))
}

/// DELETE /api/leads/{id}
pub async fn delete_lead(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(LEADS_DELETE)?;
    let storage = LeadStorage::new(auth.pool.clone());
    auth.visible(storage.get(id).await?, Dataset::Leads, "lead")?;
    storage.delete(id).await?;
    tracing::info!(lead_id = id, tenant = %auth.session.tenant, "deleted lead");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/leads/{id}/convert
///
/// Opens a draft proposal for the lead.
pub async fn convert_lead(
    auth: AuthSession,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Proposal>)> {
    auth.require_all(&[LEADS_UPDATE, PROPOSALS_CREATE])?;
    auth.visible(
        LeadStorage::new(auth.pool.clone()).get(id).await?,
        Dataset::Leads,
        "lead",
    )?;
    let proposal = pipeline::convert_lead(&auth.pool, id).await?;
    Ok((StatusCode::CREATED, Json(proposal)))
}
