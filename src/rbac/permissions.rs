/// Static role to permission table
///
/// Every role maps to a fixed list of `"resource:action"` strings. Lookups are
/// plain slice scans. A role name that is not in the table resolves to the
/// empty list, so every predicate below denies it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles known to the permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Staff, Role::User];

    /// Parse a role name; anything outside the table is `None`
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "staff" => Some(Role::Staff),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::User => "user",
        }
    }

    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::Admin => ALL_PERMISSIONS,
            Role::Manager => MANAGER_PERMISSIONS,
            Role::Staff => STAFF_PERMISSIONS,
            Role::User => USER_PERMISSIONS,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DASHBOARD_READ: &str = "dashboard:read";

pub const LEADS_READ: &str = "leads:read";
pub const LEADS_CREATE: &str = "leads:create";
pub const LEADS_UPDATE: &str = "leads:update";
pub const LEADS_DELETE: &str = "leads:delete";

pub const PROPOSALS_READ: &str = "proposals:read";
pub const PROPOSALS_CREATE: &str = "proposals:create";
pub const PROPOSALS_UPDATE: &str = "proposals:update";
pub const PROPOSALS_DELETE: &str = "proposals:delete";

pub const PROJECTS_READ: &str = "projects:read";
pub const PROJECTS_CREATE: &str = "projects:create";
pub const PROJECTS_UPDATE: &str = "projects:update";
pub const PROJECTS_DELETE: &str = "projects:delete";

pub const TASKS_READ: &str = "tasks:read";
pub const TASKS_CREATE: &str = "tasks:create";
pub const TASKS_UPDATE: &str = "tasks:update";
pub const TASKS_DELETE: &str = "tasks:delete";

pub const EMPLOYEES_READ: &str = "employees:read";
pub const EMPLOYEES_CREATE: &str = "employees:create";
pub const EMPLOYEES_UPDATE: &str = "employees:update";
pub const EMPLOYEES_DELETE: &str = "employees:delete";

pub const DEPARTMENTS_READ: &str = "departments:read";
pub const DEPARTMENTS_CREATE: &str = "departments:create";
pub const DEPARTMENTS_UPDATE: &str = "departments:update";
pub const DEPARTMENTS_DELETE: &str = "departments:delete";

pub const DESIGNATIONS_READ: &str = "designations:read";
pub const DESIGNATIONS_CREATE: &str = "designations:create";
pub const DESIGNATIONS_UPDATE: &str = "designations:update";
pub const DESIGNATIONS_DELETE: &str = "designations:delete";

pub const USERS_READ: &str = "users:read";
pub const USERS_CREATE: &str = "users:create";
pub const USERS_UPDATE: &str = "users:update";
pub const USERS_DELETE: &str = "users:delete";

/// The full permission set; `admin` holds exactly this list
pub const ALL_PERMISSIONS: &[&str] = &[
    DASHBOARD_READ,
    LEADS_READ,
    LEADS_CREATE,
    LEADS_UPDATE,
    LEADS_DELETE,
    PROPOSALS_READ,
    PROPOSALS_CREATE,
    PROPOSALS_UPDATE,
    PROPOSALS_DELETE,
    PROJECTS_READ,
    PROJECTS_CREATE,
    PROJECTS_UPDATE,
    PROJECTS_DELETE,
    TASKS_READ,
    TASKS_CREATE,
    TASKS_UPDATE,
    TASKS_DELETE,
    EMPLOYEES_READ,
    EMPLOYEES_CREATE,
    EMPLOYEES_UPDATE,
    EMPLOYEES_DELETE,
    DEPARTMENTS_READ,
    DEPARTMENTS_CREATE,
    DEPARTMENTS_UPDATE,
    DEPARTMENTS_DELETE,
    DESIGNATIONS_READ,
    DESIGNATIONS_CREATE,
    DESIGNATIONS_UPDATE,
    DESIGNATIONS_DELETE,
    USERS_READ,
    USERS_CREATE,
    USERS_UPDATE,
    USERS_DELETE,
];

const MANAGER_PERMISSIONS: &[&str] = &[
    DASHBOARD_READ,
    LEADS_READ,
    LEADS_CREATE,
    LEADS_UPDATE,
    LEADS_DELETE,
    PROPOSALS_READ,
    PROPOSALS_CREATE,
    PROPOSALS_UPDATE,
    PROPOSALS_DELETE,
    PROJECTS_READ,
    PROJECTS_CREATE,
    PROJECTS_UPDATE,
    PROJECTS_DELETE,
    TASKS_READ,
    TASKS_CREATE,
    TASKS_UPDATE,
    TASKS_DELETE,
    EMPLOYEES_READ,
    EMPLOYEES_CREATE,
    EMPLOYEES_UPDATE,
    DEPARTMENTS_READ,
    DESIGNATIONS_READ,
    USERS_READ,
];

const STAFF_PERMISSIONS: &[&str] = &[
    DASHBOARD_READ,
    LEADS_READ,
    LEADS_CREATE,
    LEADS_UPDATE,
    PROPOSALS_READ,
    PROPOSALS_CREATE,
    PROPOSALS_UPDATE,
    PROJECTS_READ,
    TASKS_READ,
    TASKS_UPDATE,
    EMPLOYEES_READ,
    DEPARTMENTS_READ,
    DESIGNATIONS_READ,
];

const USER_PERMISSIONS: &[&str] = &[DASHBOARD_READ, PROJECTS_READ, TASKS_READ, TASKS_UPDATE];

/// Permissions granted to a role name (empty for unknown roles)
pub fn permissions_for(role: &str) -> &'static [&'static str] {
    Role::parse(role).map(|role| role.permissions()).unwrap_or(&[])
}

pub fn has_permission(role: &str, permission: &str) -> bool {
    permissions_for(role).iter().any(|granted| *granted == permission)
}

/// True when the role holds at least one of `permissions`
pub fn has_any_permission(role: &str, permissions: &[&str]) -> bool {
    permissions.iter().any(|perm| has_permission(role, perm))
}

/// True when the role holds every one of `permissions`
///
/// An empty request is satisfied only by a known role.
pub fn has_all_permissions(role: &str, permissions: &[&str]) -> bool {
    Role::parse(role).is_some() && permissions.iter().all(|perm| has_permission(role, perm))
}
