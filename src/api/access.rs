/// Route access checks for the dashboard front end

use crate::api::error::ApiResult;
use crate::api::AuthSession;
use crate::rbac::routes::required_permissions;
use crate::rbac::can_access_route;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteAccess {
    pub path: String,
    pub allowed: bool,
    /// Permissions configured for the route; empty when it is unrestricted
    pub required: &'static [&'static str],
}

/// GET /api/access/route?path=/leads/12/edit
pub async fn check_route(
    auth: AuthSession,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> ApiResult<Json<RouteAccess>> {
    let Query(RouteQuery { path }) = query?;
    Ok(Json(RouteAccess {
        allowed: can_access_route(auth.role(), &path),
        required: required_permissions(&path).unwrap_or_default(),
        path,
    }))
}
