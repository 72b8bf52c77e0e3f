/// Database health probe
///
/// Failure bodies carry the driver error code (`sqlState`) when SQLite
/// reported one.

use crate::api::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: &'static str,
    pub tenants: usize,
    pub open_pools: usize,
    pub sessions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseFailure {
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_state: Option<String>,
}

impl DatabaseFailure {
    fn from_error(err: &sqlx::Error) -> Self {
        let sql_state = match err {
            sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
            _ => None,
        };
        Self {
            message: "database unavailable".to_string(),
            code: "database_unavailable",
            sql_state,
        }
    }
}

/// GET /api/health/db
pub async fn database_health(State(state): State<AppState>) -> Response {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&state.master).await {
        Ok(_) => Json(DatabaseHealth {
            status: "ok",
            tenants: state.tenants.len(),
            open_pools: state.databases.open_pools().await,
            sessions: state.sessions.len().await,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = ?err, "database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DatabaseFailure::from_error(&err)),
            )
                .into_response()
        }
    }
}
