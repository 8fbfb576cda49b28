//! Route definitions for the Libris HTTP API.
//!
//! All routes are mounted under `/api`. Every request passes through the
//! authentication middleware; guards are attached per route group with
//! `route_layer` so unmatched paths still 404 instead of 401.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, authentication, and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout
fn auth_routes() -> Router<AppState> {
    let guarded = Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn(middleware::rbac::require_user));

    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .merge(guarded)
}

/// Registration and self lookup
fn user_routes() -> Router<AppState> {
    let guarded = Router::new()
        .route("/users/me", get(handlers::user::me))
        .route_layer(axum_middleware::from_fn(middleware::rbac::require_user));

    Router::new()
        .route("/users", post(handlers::user::register))
        .merge(guarded)
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users/{username}", get(handlers::admin::get_user))
        .route_layer(axum_middleware::from_fn(middleware::rbac::require_admin))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
