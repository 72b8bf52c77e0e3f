/// Proposal endpoints

use crate::api::error::ApiResult;
use crate::api::{AuthSession, ListResponse};
use crate::crm::pipeline;
use crate::crm::storage::ProposalStorage;
use crate::crm::{Project, Proposal, ProposalInput, ProposalStatus};
use crate::rbac::permissions::{
    PROJECTS_CREATE, PROPOSALS_CREATE, PROPOSALS_DELETE, PROPOSALS_READ, PROPOSALS_UPDATE,
};
use crate::rbac::Dataset;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ProposalFilter {
    pub status: Option<ProposalStatus>,
}

pub async fn list_proposals(
    auth: AuthSession,
    query: Result<Query<ProposalFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Proposal>>> {
    auth.require(PROPOSALS_READ)?;
    let Query(filter) = query?;
    let proposals = ProposalStorage::new(auth.pool.clone()).list(filter.status).await?;
    Ok(Json(auth.filter(proposals, Dataset::Proposals).into()))
}

pub async fn create_proposal(
    auth: AuthSession,
    payload: Result<Json<ProposalInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Proposal>)> {
    auth.require(PROPOSALS_CREATE)?;
    let Json(mut input) = payload?;
    input.validate()?;
    input.assignee_id = auth.default_owner(input.assignee_id, Dataset::Proposals);

    let proposal = ProposalStorage::new(auth.pool.clone()).create(&input).await?;
    tracing::info!(proposal_id = proposal.id, tenant = %auth.session.tenant, "created proposal");
    Ok((StatusCode::CREATED, Json(proposal)))
}

pub async fn get_proposal(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<Proposal>> {
    auth.require(PROPOSALS_READ)?;
    let proposal = ProposalStorage::new(auth.pool.clone()).get(id).await?;
    Ok(Json(auth.visible(proposal, Dataset::Proposals, "proposal")?))
}

pub async fn update_proposal(
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<ProposalInput>, JsonRejection>,
) -> ApiResult<Json<Proposal>> {
    auth.require(PROPOSALS_UPDATE)?;
    let Json(mut input) = payload?;
    input.validate()?;

    let storage = ProposalStorage::new(auth.pool.clone());
    let current = auth.visible(storage.get(id).await?, Dataset::Proposals, "proposal")?;
    input.assignee_id = auth.keep_owner(input.assignee_id, &current, Dataset::Proposals);
    Ok(Json(storage.update(id, &input).await?))
}

pub async fn delete_proposal(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    auth.require(PROPOSALS_DELETE)?;
    let storage = ProposalStorage::new(auth.pool.clone());
    auth.visible(storage.get(id).await?, Dataset::Proposals, "proposal")?;
    storage.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/proposals/{id}/convert
///
/// Starts a project from an accepted proposal; 409 otherwise.
pub async fn convert_proposal(
    auth: AuthSession,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    auth.require_all(&[PROPOSALS_UPDATE, PROJECTS_CREATE])?;
    auth.visible(
        ProposalStorage::new(auth.pool.clone()).get(id).await?,
        Dataset::Proposals,
        "proposal",
    )?;
    let project = pipeline::convert_proposal(&auth.pool, id).await?;
    Ok((StatusCode::CREATED, Json(project)))
}
