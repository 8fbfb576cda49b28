//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use libris_database::StoreStatus;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// 503 when the PostgreSQL store does not answer.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store = match &state.db_pool {
        None => StoreStatus::Memory,
        Some(pool) => pool.status().await,
    };

    let (status, label) = if store.is_available() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: store.as_str().to_string(),
    };

    (status, Json(ApiResponse::ok(body)))
}
