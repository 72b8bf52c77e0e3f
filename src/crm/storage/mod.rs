/// SQLite persistence for CRM records
///
/// One storage type per table, each wrapping the tenant's connection pool.
/// Creates and updates return the stored row as read back from the database.

pub mod departments;
pub mod designations;
pub mod employees;
pub mod leads;
pub mod projects;
pub mod proposals;
pub mod tasks;
pub mod users;

pub use departments::DepartmentStorage;
pub use designations::DesignationStorage;
pub use employees::EmployeeStorage;
pub use leads::LeadStorage;
pub use projects::ProjectStorage;
pub use proposals::ProposalStorage;
pub use tasks::TaskStorage;
pub use users::UserStorage;

/// Trimmed text, with blanks stored as NULL
pub(crate) fn optional_text(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
