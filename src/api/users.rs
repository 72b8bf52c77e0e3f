/// User account endpoints
///
/// Accounts are managed by holders of the `users:*` permissions. Anyone may
/// update their own profile and password, but role and status only change
/// with `users:update`.

use crate::api::error::{api_conflict, api_forbidden, api_internal, ApiResult};
use crate::api::{AppState, AuthSession, ListResponse};
use crate::auth::hash_password;
use crate::crm::storage::UserStorage;
use crate::crm::{User, UserInput, UserStatus};
use crate::rbac::permissions::{USERS_CREATE, USERS_DELETE, USERS_READ, USERS_UPDATE};
use crate::rbac::{has_permission, Dataset, Role};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub role: Option<Role>,
}

pub async fn list_users(
    auth: AuthSession,
    query: Result<Query<UserFilter>, QueryRejection>,
) -> ApiResult<Json<ListResponse<User>>> {
    auth.require(USERS_READ)?;
    let Query(filter) = query?;
    let users = UserStorage::new(auth.pool.clone()).list(filter.role).await?;
    Ok(Json(auth.filter(users, Dataset::Users).into()))
}

pub async fn create_user(
    auth: AuthSession,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    auth.require(USERS_CREATE)?;
    let Json(input) = payload?;
    input.validate(true)?;

    let hash = hash_password(input.password.as_deref().unwrap_or_default())
        .map_err(|err| api_internal("failed to hash password", &err))?;
    let user = UserStorage::new(auth.pool.clone()).create(&input, &hash).await?;
    tracing::info!(user_id = user.id, role = %user.role, tenant = %auth.session.tenant, "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(auth: AuthSession, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    if id != auth.user_id() {
        auth.require(USERS_READ)?;
    }
    Ok(Json(UserStorage::new(auth.pool.clone()).get(id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<i64>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let may_manage = has_permission(auth.role(), USERS_UPDATE);
    if id != auth.user_id() && !may_manage {
        return Err(api_forbidden(&format!("missing permission {USERS_UPDATE}")));
    }
    let Json(input) = payload?;
    input.validate(false)?;

    let storage = UserStorage::new(auth.pool.clone());
    let current = storage.get(id).await?;
    if !may_manage && (input.role != current.role || input.status != current.status) {
        return Err(api_forbidden("changing role or status requires users:update"));
    }

    let hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|err| api_internal("failed to hash password", &err))?;
    let user = storage.update(id, &input, hash.as_deref()).await?;

    if user.status == UserStatus::Disabled || user.role != current.role {
        let revoked = state.sessions.revoke_user(&auth.session.tenant, id).await;
        tracing::info!(user_id = id, revoked, "revoked sessions after account change");
    }
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    auth.require(USERS_DELETE)?;
    if id == auth.user_id() {
        return Err(api_conflict("self_delete", "you cannot delete your own account"));
    }
    UserStorage::new(auth.pool.clone()).delete(id).await?;
    state.sessions.revoke_user(&auth.session.tenant, id).await;
    tracing::info!(user_id = id, tenant = %auth.session.tenant, "deleted user");
    Ok(StatusCode::NO_CONTENT)
}
