//! Admin-only handlers.

use axum::Json;
use axum::extract::{Path, State};

use libris_core::error::AppError;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/admin/users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user '{username}' not found")))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
