/// Dashboard summary
///
/// Folds the (already role-filtered) record lists into per-status counts and
/// money totals. Every status appears in its map, with zero when unused.

use crate::crm::types::*;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub leads: LeadSummary,
    pub proposals: ProposalSummary,
    pub projects: StatusCounts,
    pub tasks: StatusCounts,
    pub employees: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSummary {
    pub total: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    /// Value of leads that are neither won nor lost
    pub open_pipeline_value: f64,
    pub won_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalSummary {
    pub total: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    pub accepted_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub by_status: BTreeMap<&'static str, usize>,
}

fn count_by<S: Copy>(
    all: &[S],
    name: fn(&S) -> &'static str,
    items: impl Iterator<Item = S>,
) -> StatusCounts {
    let mut by_status: BTreeMap<&'static str, usize> =
        all.iter().map(|status| (name(status), 0)).collect();
    let mut total = 0;
    for status in items {
        *by_status.entry(name(&status)).or_default() += 1;
        total += 1;
    }
    StatusCounts { total, by_status }
}

pub fn summarize(
    leads: &[Lead],
    proposals: &[Proposal],
    projects: &[Project],
    tasks: &[Task],
    employees: &[Employee],
) -> DashboardSummary {
    let lead_counts = count_by(LeadStatus::ALL, LeadStatus::as_str, leads.iter().map(|l| l.status));
    let open_pipeline_value: f64 = leads
        .iter()
        .filter(|lead| !matches!(lead.status, LeadStatus::Won | LeadStatus::Lost))
        .map(|lead| lead.value)
        .sum();
    let won_value: f64 = leads
        .iter()
        .filter(|lead| lead.status == LeadStatus::Won)
        .map(|lead| lead.value)
        .sum();

    let proposal_counts = count_by(
        ProposalStatus::ALL,
        ProposalStatus::as_str,
        proposals.iter().map(|p| p.status),
    );
    let accepted_amount: f64 = proposals
        .iter()
        .filter(|proposal| proposal.status == ProposalStatus::Accepted)
        .map(|proposal| proposal.amount)
        .sum();

    DashboardSummary {
        leads: LeadSummary {
            total: lead_counts.total,
            by_status: lead_counts.by_status,
            open_pipeline_value,
            won_value,
        },
        proposals: ProposalSummary {
            total: proposal_counts.total,
            by_status: proposal_counts.by_status,
            accepted_amount,
        },
        projects: count_by(ProjectStatus::ALL, ProjectStatus::as_str, projects.iter().map(|p| p.status)),
        tasks: count_by(TaskStatus::ALL, TaskStatus::as_str, tasks.iter().map(|t| t.status)),
        employees: count_by(
            EmployeeStatus::ALL,
            EmployeeStatus::as_str,
            employees.iter().map(|e| e.status),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(status: LeadStatus, value: f64) -> Lead {
        Lead {
            id: 1,
            name: "n".to_string(),
            company: None,
            email: None,
            phone: None,
            source: None,
            status,
            value,
            assignee_id: None,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn proposal(status: ProposalStatus, amount: f64) -> Proposal {
        Proposal {
            id: 1,
            title: "t".to_string(),
            lead_id: None,
            status,
            amount,
            valid_until: None,
            assignee_id: None,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_inputs_report_zero_for_every_status() {
        let summary = summarize(&[], &[], &[], &[], &[]);
        assert_eq!(summary.leads.total, 0);
        assert_eq!(summary.leads.by_status.len(), LeadStatus::ALL.len());
        assert!(summary.tasks.by_status.values().all(|count| *count == 0));
        assert_eq!(summary.projects.by_status.get("on_hold"), Some(&0));
    }

    #[test]
    fn pipeline_value_excludes_closed_leads() {
        let leads = vec![
            lead(LeadStatus::New, 100.0),
            lead(LeadStatus::Qualified, 250.0),
            lead(LeadStatus::Won, 1000.0),
            lead(LeadStatus::Lost, 40.0),
        ];
        let proposals = vec![
            proposal(ProposalStatus::Accepted, 900.0),
            proposal(ProposalStatus::Sent, 300.0),
            proposal(ProposalStatus::Accepted, 100.0),
        ];
        let summary = summarize(&leads, &proposals, &[], &[], &[]);

        assert_eq!(summary.leads.total, 4);
        assert_eq!(summary.leads.open_pipeline_value, 350.0);
        assert_eq!(summary.leads.won_value, 1000.0);
        assert_eq!(summary.leads.by_status["won"], 1);
        assert_eq!(summary.proposals.accepted_amount, 1000.0);
        assert_eq!(summary.proposals.by_status["accepted"], 2);
        assert_eq!(summary.proposals.by_status["draft"], 0);
    }
}
