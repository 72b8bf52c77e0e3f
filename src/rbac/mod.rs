/// Role-based access control
///
/// Three static lookups, no persistence:
/// - permissions: role -> "resource:action" list and membership predicates
/// - routes: dashboard route -> required permissions, role-filtered navigation
/// - filter: per-dataset ownership rules applied to query results

pub mod filter;
pub mod permissions;
pub mod routes;

pub use filter::{can_view_record, filter_data_by_role, sees_only_own, Dataset, Owned};
pub use permissions::{
    has_all_permissions, has_any_permission, has_permission, permissions_for, Role,
};
pub use routes::{can_access_route, navigation_for, NavItem};
