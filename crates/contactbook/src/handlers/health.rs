//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Storage probe (answers a user count query)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use contactbook_core::storage::UserFilter;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Storage probe.
///
/// Returns 200 with the number of stored users, or 503 if the backend does
/// not answer.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.user_repo.count_users(&UserFilter::default()).await {
        Ok(users) => {
            (StatusCode::OK, Json(json!({ "status": "ok", "users": users }))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
