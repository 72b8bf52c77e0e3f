/// Login, logout and current-user endpoints

use crate::api::error::{api_forbidden, api_unauthorized, ApiResult};
use crate::api::{AppState, AuthSession};
use crate::auth::verify_password;
use crate::crm::storage::UserStorage;
use crate::crm::{StoreError, User, UserStatus};
use crate::rbac::{navigation_for, permissions_for, NavItem};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub tenant: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Who the caller is and what the dashboard should show them
#[derive(Debug, Serialize)]
pub struct Profile {
    pub tenant: String,
    pub user: User,
    pub permissions: &'static [&'static str],
    pub navigation: Vec<NavItem>,
}

impl Profile {
    fn new(tenant: &str, user: User) -> Self {
        let role = user.role.as_str();
        Self {
            tenant: tenant.to_string(),
            permissions: permissions_for(role),
            navigation: navigation_for(role),
            user,
        }
    }
}

const BAD_CREDENTIALS: &str = "invalid tenant, email or password";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let tenant = request.tenant.trim();
    if !state.tenants.contains(tenant) {
        return Err(api_unauthorized(BAD_CREDENTIALS));
    }

    let pool = state.tenant_pool(tenant).await?;
    let credentials = UserStorage::new(pool)
        .credentials(request.email.trim())
        .await?
        .filter(|found| verify_password(&request.password, &found.password_hash))
        .ok_or_else(|| {
            tracing::info!(tenant, "rejected login");
            api_unauthorized(BAD_CREDENTIALS)
        })?;

    if credentials.user.status == UserStatus::Disabled {
        return Err(api_forbidden("account is disabled"));
    }

    let session = state.sessions.create(tenant, &credentials.user).await;
    tracing::info!(tenant, user_id = session.user_id, "user signed in");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        profile: Profile::new(tenant, credentials.user),
    }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, auth: AuthSession) -> StatusCode {
    state.sessions.revoke(&auth.session.token).await;
    StatusCode::NO_CONTENT
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthSession) -> ApiResult<Json<Profile>> {
    let user = match UserStorage::new(auth.pool.clone()).get(auth.user_id()).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => {
            state.sessions.revoke(&auth.session.token).await;
            return Err(api_unauthorized("account no longer exists"));
        }
        Err(err) => return Err(err.into()),
    };
    Ok(Json(Profile::new(&auth.session.tenant, user)))
}
