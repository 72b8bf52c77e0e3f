/// Request authentication
///
/// `AuthSession` resolves `Authorization: Bearer <token>` to a live session and
/// the caller's tenant pool. Handlers then check permissions and record
/// visibility through it.

use crate::api::error::{api_forbidden, api_not_found, api_unauthorized, ApiResult, ApiError};
use crate::api::AppState;
use crate::auth::Session;
use crate::rbac::{self, Dataset, Owned};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use sqlx::sqlite::SqlitePool;

/// Authenticated caller plus their tenant's database
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session: Session,
    pub pool: SqlitePool,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim).filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| api_unauthorized("missing bearer token"))?;
        let session = state
            .sessions
            .get(token)
            .await
            .ok_or_else(|| api_unauthorized("session expired or unknown"))?;
        let pool = state.tenant_pool(&session.tenant).await?;
        Ok(Self { session, pool })
    }
}

impl AuthSession {
    pub fn role(&self) -> &str {
        &self.session.role
    }

    pub fn user_id(&self) -> i64 {
        self.session.user_id
    }

    pub fn require(&self, permission: &str) -> ApiResult<()> {
        if rbac::has_permission(self.role(), permission) {
            return Ok(());
        }
        tracing::debug!(role = self.role(), permission, "permission denied");
        Err(api_forbidden(&format!("missing permission {permission}")))
    }

    pub fn require_all(&self, permissions: &[&str]) -> ApiResult<()> {
        if rbac::has_all_permissions(self.role(), permissions) {
            return Ok(());
        }
        tracing::debug!(role = self.role(), ?permissions, "permission denied");
        Err(api_forbidden(&format!("requires all of {}", permissions.join(", "))))
    }

    /// Records this caller may see, in their original order
    pub fn filter<T: Owned>(&self, records: Vec<T>, dataset: Dataset) -> Vec<T> {
        rbac::filter_data_by_role(self.role(), records, dataset, self.user_id())
    }

    /// Pass `record` through if visible; hidden records read as missing
    pub fn visible<T: Owned>(&self, record: T, dataset: Dataset, what: &str) -> ApiResult<T> {
        if rbac::can_view_record(self.role(), &record, dataset, self.user_id()) {
            Ok(record)
        } else {
            Err(api_not_found(&format!("{what} not found")))
        }
    }

    /// Fill in an empty assignee for roles that only see their own records,
    /// so the caller can still see what they just created
    pub fn default_owner(&self, assignee: Option<i64>, dataset: Dataset) -> Option<i64> {
        if assignee.is_none() && rbac::sees_only_own(self.role(), dataset) {
            Some(self.user_id())
        } else {
            assignee
        }
    }

    /// On a full replace, keep the current owner when a role that only sees
    /// its own records leaves the assignee empty
    pub fn keep_owner<T: Owned>(
        &self,
        assignee: Option<i64>,
        current: &T,
        dataset: Dataset,
    ) -> Option<i64> {
        if assignee.is_none() && rbac::sees_only_own(self.role(), dataset) {
            current.owner_id()
        } else {
            assignee
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
