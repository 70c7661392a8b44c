//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.db {
        None => None,
        Some(ref db) => match db.health_check().await {
            Ok(true) => Some("connected"),
            Ok(false) => Some("unavailable"),
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                Some("unavailable")
            }
        },
    };

    let status = if database == Some("unavailable") {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.map(String::from),
    }))
}
