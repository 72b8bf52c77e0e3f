/// Pipeline conversions: lead -> proposal -> project
///
/// Each conversion reads the source row, writes the new row and updates the
/// source inside one transaction.

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::{ProjectStorage, ProposalStorage};
use crate::crm::types::{LeadStatus, Project, ProjectStatus, Proposal, ProposalStatus};
use sqlx::sqlite::SqlitePool;

/// Open a draft proposal for a lead and move the lead to the proposal stage
///
/// Won or lost leads are closed and cannot be converted.
pub async fn convert_lead(pool: &SqlitePool, lead_id: i64) -> StoreResult<Proposal> {
    let mut tx = pool.begin().await?;

    let (name, company, status, value, assignee_id) =
        sqlx::query_as::<_, (String, Option<String>, LeadStatus, f64, Option<i64>)>(
            "SELECT name, company, status, value, assignee_id FROM leads WHERE id = ?",
        )
        .bind(lead_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("lead {lead_id}")))?;

    if matches!(status, LeadStatus::Won | LeadStatus::Lost) {
        return Err(StoreError::Conflict(format!(
            "lead {lead_id} is closed ({})",
            status.as_str()
        )));
    }

    let title = format!("Proposal for {}", company.unwrap_or(name));
    let proposal_id = sqlx::query(
        r#"
        INSERT INTO proposals (title, lead_id, status, amount, assignee_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&title)
    .bind(lead_id)
    .bind(ProposalStatus::Draft)
    .bind(value)
    .bind(assignee_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query("UPDATE leads SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(LeadStatus::Proposal)
        .bind(lead_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(lead_id, proposal_id, "converted lead to proposal");

    ProposalStorage::new(pool.clone()).get(proposal_id).await
}

/// Start a project from an accepted proposal
///
/// A proposal converts at most once.
pub async fn convert_proposal(pool: &SqlitePool, proposal_id: i64) -> StoreResult<Project> {
    let mut tx = pool.begin().await?;

    let (title, status, amount, assignee_id, client) =
        sqlx::query_as::<_, (String, ProposalStatus, f64, Option<i64>, Option<String>)>(
            r#"
            SELECT p.title, p.status, p.amount, p.assignee_id, l.company
            FROM proposals p LEFT JOIN leads l ON l.id = p.lead_id
            WHERE p.id = ?
            "#,
        )
        .bind(proposal_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("proposal {proposal_id}")))?;

    if status != ProposalStatus::Accepted {
        return Err(StoreError::Conflict(format!(
            "proposal {proposal_id} is {}, only accepted proposals become projects",
            status.as_str()
        )));
    }

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM projects WHERE proposal_id = ?")
        .bind(proposal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if let Some(project_id) = existing {
        return Err(StoreError::Conflict(format!(
            "proposal {proposal_id} already became project {project_id}"
        )));
    }

    let project_id = sqlx::query(
        r#"
        INSERT INTO projects (name, client, proposal_id, status, budget, manager_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&title)
    .bind(client)
    .bind(proposal_id)
    .bind(ProjectStatus::Planning)
    .bind(amount)
    .bind(assignee_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    tracing::info!(proposal_id, project_id, "converted proposal to project");

    ProjectStorage::new(pool.clone()).get(project_id).await
}
