/// Dashboard route requirements and role-filtered navigation
///
/// Routes are matched segment by segment; a `{id}` segment accepts any single
/// non-empty segment. Routes absent from the table carry no requirement.

use crate::rbac::permissions::*;
use serde::Serialize;

/// Route pattern -> permissions, any one of which grants access
pub const ROUTE_PERMISSIONS: &[(&str, &[&str])] = &[
    ("/dashboard", &[DASHBOARD_READ]),
    ("/leads", &[LEADS_READ]),
    ("/leads/new", &[LEADS_CREATE]),
    ("/leads/{id}", &[LEADS_READ]),
    ("/leads/{id}/edit", &[LEADS_UPDATE]),
    ("/proposals", &[PROPOSALS_READ]),
    ("/proposals/new", &[PROPOSALS_CREATE]),
    ("/proposals/{id}", &[PROPOSALS_READ]),
    ("/proposals/{id}/edit", &[PROPOSALS_UPDATE]),
    ("/projects", &[PROJECTS_READ]),
    ("/projects/new", &[PROJECTS_CREATE]),
    ("/projects/{id}", &[PROJECTS_READ]),
    ("/projects/{id}/edit", &[PROJECTS_UPDATE]),
    ("/tasks", &[TASKS_READ]),
    ("/tasks/new", &[TASKS_CREATE]),
    ("/tasks/{id}", &[TASKS_READ]),
    ("/tasks/{id}/edit", &[TASKS_UPDATE]),
    ("/employees", &[EMPLOYEES_READ]),
    ("/employees/new", &[EMPLOYEES_CREATE]),
    ("/employees/{id}", &[EMPLOYEES_READ]),
    ("/employees/{id}/edit", &[EMPLOYEES_UPDATE]),
    ("/departments", &[DEPARTMENTS_READ]),
    ("/designations", &[DESIGNATIONS_READ]),
    ("/users", &[USERS_READ]),
    ("/users/new", &[USERS_CREATE]),
];

/// A navigation entry; sections carry children and no route of their own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

struct NavEntry {
    label: &'static str,
    route: Option<&'static str>,
    children: &'static [NavEntry],
}

const fn link(label: &'static str, route: &'static str) -> NavEntry {
    NavEntry {
        label,
        route: Some(route),
        children: &[],
    }
}

const NAVIGATION: &[NavEntry] = &[
    link("Dashboard", "/dashboard"),
    NavEntry {
        label: "Sales",
        route: None,
        children: &[link("Leads", "/leads"), link("Proposals", "/proposals")],
    },
    NavEntry {
        label: "Delivery",
        route: None,
        children: &[link("Projects", "/projects"), link("Tasks", "/tasks")],
    },
    NavEntry {
        label: "People",
        route: None,
        children: &[
            link("Employees", "/employees"),
            link("Departments", "/departments"),
            link("Designations", "/designations"),
        ],
    },
    NavEntry {
        label: "Administration",
        route: None,
        children: &[link("Users", "/users")],
    },
];

fn normalize(route: &str) -> &str {
    let route = route.split(['?', '#']).next().unwrap_or(route);
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn pattern_matches(pattern: &str, route: &str) -> bool {
    let mut expected = pattern.split('/');
    let mut actual = route.split('/');
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return true,
            (Some("{id}"), Some(segment)) if !segment.is_empty() => {}
            (Some(want), Some(got)) if want == got => {}
            _ => return false,
        }
    }
}

/// Permissions configured for a route, if any
///
/// Literal patterns win over `{id}` patterns, so `/leads/new` is never read
/// as a lead id.
pub fn required_permissions(route: &str) -> Option<&'static [&'static str]> {
    let route = normalize(route);
    ROUTE_PERMISSIONS
        .iter()
        .find(|(pattern, _)| *pattern == route)
        .or_else(|| {
            ROUTE_PERMISSIONS
                .iter()
                .find(|(pattern, _)| pattern.contains("{id}") && pattern_matches(pattern, route))
        })
        .map(|(_, perms)| *perms)
}

pub fn can_access_route(role: &str, route: &str) -> bool {
    match required_permissions(route) {
        None => true,
        Some(required) => has_any_permission(role, required),
    }
}

/// Navigation tree visible to a role
pub fn navigation_for(role: &str) -> Vec<NavItem> {
    filter_entries(role, NAVIGATION)
}

fn filter_entries(role: &str, entries: &[NavEntry]) -> Vec<NavItem> {
    entries
        .iter()
        .filter_map(|entry| match entry.route {
            Some(route) => can_access_route(role, route).then(|| NavItem {
                label: entry.label,
                route: Some(route),
                children: Vec::new(),
            }),
            None => {
                let children = filter_entries(role, entry.children);
                (!children.is_empty()).then(|| NavItem {
                    label: entry.label,
                    route: None,
                    children,
                })
            }
        })
        .collect()
}
