//! Health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// `GET /health`
///
/// 200 when the database answers, 503 otherwise. Migration counts are
/// included for diagnostics.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = state.db.health_check().await;
    let migrations = state.db.migration_status().await.ok();

    let (status, label, message) = if database {
        (StatusCode::OK, "OK", "API Running")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", "Database unreachable")
    };

    (
        status,
        Json(json!({
            "status": label,
            "message": message,
            "database": database,
            "migrations": migrations,
        })),
    )
}
