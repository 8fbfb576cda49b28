//! User handlers: registration and self lookup.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use libris_auth::NewAccount;
use libris_entity::user::AccountRole;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let role: AccountRole = req.account_type.parse()?;

    let user = state
        .session_manager
        .register(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
            role,
            address: req.address,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// GET /api/users/me
pub async fn me(AuthUser(caller): AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(caller.user)))
}
