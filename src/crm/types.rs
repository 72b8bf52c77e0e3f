/// CRM record and input types
///
/// Records mirror the tenant database tables and are what the API returns.
/// Inputs are the request bodies for create and full-replace update.

use crate::rbac::{Owned, Role};
use serde::{Deserialize, Serialize};

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        #[serde(rename_all = "snake_case")]
        #[sqlx(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

status_enum! {
    /// Sales pipeline stage of a lead
    LeadStatus {
        New => "new",
        Contacted => "contacted",
        Qualified => "qualified",
        Proposal => "proposal",
        Won => "won",
        Lost => "lost",
    } default New
}

status_enum! {
    ProposalStatus {
        Draft => "draft",
        Sent => "sent",
        Accepted => "accepted",
        Rejected => "rejected",
    } default Draft
}

status_enum! {
    ProjectStatus {
        Planning => "planning",
        Active => "active",
        OnHold => "on_hold",
        Completed => "completed",
        Cancelled => "cancelled",
    } default Planning
}

status_enum! {
    TaskStatus {
        Todo => "todo",
        InProgress => "in_progress",
        Done => "done",
    } default Todo
}

status_enum! {
    EmployeeStatus {
        Active => "active",
        OnLeave => "on_leave",
        Inactive => "inactive",
    } default Active
}

status_enum! {
    /// Disabled users keep their row but cannot sign in
    UserStatus {
        Active => "active",
        Disabled => "disabled",
    } default Active
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Designation {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DesignationInput {
    pub name: String,
    pub department_id: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    pub designation_id: Option<i64>,
    pub status: EmployeeStatus,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub designation_id: Option<i64>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
}

/// An account that can sign in to a tenant
///
/// The password hash lives in its own column and is never loaded into this
/// struct.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub employee_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body for user create and update
///
/// `password` is required on create; on update `None` keeps the old one.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub value: f64,
    pub assignee_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadInput {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Proposal {
    pub id: i64,
    pub title: String,
    pub lead_id: Option<i64>,
    pub status: ProposalStatus,
    pub amount: f64,
    pub valid_until: Option<String>,
    pub assignee_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalInput {
    pub title: String,
    #[serde(default)]
    pub lead_id: Option<i64>,
    #[serde(default)]
    pub status: ProposalStatus,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client: Option<String>,
    pub proposal_id: Option<i64>,
    pub status: ProjectStatus,
    pub budget: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub manager_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub proposal_id: Option<i64>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub manager_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub project_id: Option<i64>,
    pub status: TaskStatus,
    pub assignee_id: Option<i64>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Owned for Lead {
    fn owner_id(&self) -> Option<i64> {
        self.assignee_id
    }
}

impl Owned for Proposal {
    fn owner_id(&self) -> Option<i64> {
        self.assignee_id
    }
}

impl Owned for Project {
    fn owner_id(&self) -> Option<i64> {
        self.manager_id
    }
}

impl Owned for Task {
    fn owner_id(&self) -> Option<i64> {
        self.assignee_id
    }
}

impl Owned for Employee {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}

impl Owned for Department {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}

impl Owned for Designation {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}

impl Owned for User {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}
