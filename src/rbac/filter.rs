/// Per-dataset ownership filters
///
/// Some roles only see the rows assigned to them. The rule table lives in
/// `ownership_rule`; each record type says who owns it through `Owned`.

use crate::rbac::permissions::Role;

/// Datasets the API serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Tasks,
    Leads,
    Proposals,
    Projects,
    Employees,
    Departments,
    Designations,
    Users,
}

/// Records that can be tested for ownership
pub trait Owned {
    /// The user the record is assigned to, if any
    fn owner_id(&self) -> Option<i64>;
}

/// What a role sees of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Everything,
    OwnedOnly,
    Nothing,
}

fn ownership_rule(role: &str, dataset: Dataset) -> Visibility {
    match (Role::parse(role), dataset) {
        (None, _) => Visibility::Nothing,
        (Some(Role::Admin | Role::Manager), _) => Visibility::Everything,
        (Some(Role::Staff), Dataset::Tasks | Dataset::Leads | Dataset::Proposals) => {
            Visibility::OwnedOnly
        }
        (Some(Role::User), Dataset::Tasks) => Visibility::OwnedOnly,
        (Some(Role::Staff | Role::User), _) => Visibility::Everything,
    }
}

/// Whether a single record is visible to `role` acting as `user_id`
pub fn can_view_record<T: Owned>(role: &str, record: &T, dataset: Dataset, user_id: i64) -> bool {
    match ownership_rule(role, dataset) {
        Visibility::Everything => true,
        Visibility::OwnedOnly => record.owner_id() == Some(user_id),
        Visibility::Nothing => false,
    }
}

/// Whether `role` is limited to its own records in `dataset`
pub fn sees_only_own(role: &str, dataset: Dataset) -> bool {
    ownership_rule(role, dataset) == Visibility::OwnedOnly
}

/// Keep only the records `role` may see
///
/// Admins and managers get the input back untouched; unknown roles get
/// nothing.
pub fn filter_data_by_role<T: Owned>(
    role: &str,
    records: Vec<T>,
    dataset: Dataset,
    user_id: i64,
) -> Vec<T> {
    match ownership_rule(role, dataset) {
        Visibility::Everything => records,
        Visibility::Nothing => Vec::new(),
        Visibility::OwnedOnly => records
            .into_iter()
            .filter(|record| record.owner_id() == Some(user_id))
            .collect(),
    }
}
