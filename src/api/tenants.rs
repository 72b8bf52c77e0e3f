/// Tenant provisioning
///
/// Creates a tenant, its database and its first admin account in one call.
/// Guarded by a shared bootstrap token; with no token configured the
/// endpoint reports `not_enabled`.

use crate::api::error::{
    api_conflict, api_internal, api_not_enabled, api_unauthorized, ApiError, ApiResult,
};
use crate::api::AppState;
use crate::auth::{constant_time_eq, hash_password};
use crate::crm::storage::UserStorage;
use crate::crm::validation::required;
use crate::crm::{User, UserInput, UserStatus, ValidationError};
use crate::rbac::Role;
use crate::tenant::Tenant;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const BOOTSTRAP_HEADER: &str = "X-Bootstrap-Token";

#[derive(Debug, Deserialize)]
pub struct AdminAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub slug: String,
    pub name: String,
    pub admin: AdminAccount,
}

#[derive(Debug, Serialize)]
pub struct CreateTenantResponse {
    pub tenant: Tenant,
    pub admin: User,
}

fn ensure_bootstrap_authorized(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let expected = state
        .config
        .auth
        .bootstrap_token
        .as_deref()
        .ok_or_else(|| api_not_enabled("tenant bootstrap not enabled"))?;

    let token = match headers.get(BOOTSTRAP_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| api_unauthorized("invalid bootstrap token"))?,
        None => return Err(api_unauthorized("missing bootstrap token")),
    };

    if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
        return Err(api_unauthorized("invalid bootstrap token"));
    }
    Ok(())
}

/// POST /api/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateTenantRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateTenantResponse>)> {
    ensure_bootstrap_authorized(&state, &headers)?;

    let Json(request) = payload?;
    let slug = request.slug.trim();
    if !Tenant::is_valid_slug(slug) {
        return Err(ValidationError::new(
            "slug",
            "must be 2-63 lowercase letters, digits or dashes, starting with a letter or digit",
        )
        .into());
    }
    required("name", &request.name)?;

    let admin = UserInput {
        name: request.admin.name,
        email: request.admin.email,
        role: Role::Admin,
        status: UserStatus::Active,
        employee_id: None,
        password: Some(request.admin.password),
    };
    admin.validate(true)?;

    let tenant = state
        .tenants
        .register(slug, request.name.trim())
        .await
        .map_err(|err| api_internal("failed to register tenant", &err))?
        .ok_or_else(|| api_conflict("already_exists", "tenant already exists"))?;

    match provision_admin(&state, &tenant, &admin).await {
        Ok(user) => {
            tracing::info!("🏢 Provisioned tenant {} with admin {}", tenant.slug, user.email);
            Ok((StatusCode::CREATED, Json(CreateTenantResponse { tenant, admin: user })))
        }
        Err(err) => {
            tracing::warn!("rolling back tenant {} after failed provisioning", tenant.slug);
            state.databases.evict(&tenant.slug).await;
            if let Err(rollback) = state.tenants.unregister(&tenant.slug).await {
                tracing::error!(error = ?rollback, "failed to roll back tenant {}", tenant.slug);
            }
            Err(err)
        }
    }
}

async fn provision_admin(state: &AppState, tenant: &Tenant, admin: &UserInput) -> Result<User, ApiError> {
    let pool = state
        .databases
        .tenant_pool(tenant)
        .await
        .map_err(|err| api_internal("failed to create tenant database", &err))?;
    let hash = hash_password(admin.password.as_deref().unwrap_or_default())
        .map_err(|err| api_internal("failed to hash password", &err))?;
    Ok(UserStorage::new(pool).create(admin, &hash).await?)
}
