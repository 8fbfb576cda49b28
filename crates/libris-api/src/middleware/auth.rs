//! Bearer token authentication middleware.
//!
//! Runs on every request and binds an [`Identity`] into the request
//! extensions. Authentication is optional here; the guards in
//! [`super::rbac`] decide what each route requires.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, VARY};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use libris_auth::token::is_well_formed;
use libris_core::error::AppError;
use libris_entity::session::Identity;

use crate::error::ApiError;
use crate::state::AppState;

const INVALID_TOKEN: &str = "invalid or expired authentication token";

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// A missing header, a non-UTF-8 value, or any other scheme yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the request's bearer token and bind the resulting identity.
///
/// - no usable `Authorization` header: bind [`Identity::Anonymous`]
/// - token with the wrong length or alphabet: 401 without a store lookup
/// - token with no live match in any scope: 401
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map(str::to_owned);

    let identity = match token {
        None => Identity::Anonymous,
        Some(token) => {
            if !is_well_formed(&token) {
                debug!("Rejected malformed bearer token");
                return Err(AppError::authentication(INVALID_TOKEN).into());
            }
            match state.tokens.resolve_any_scope(&token).await? {
                Some(user) => Identity::Authenticated(user),
                None => {
                    debug!("Bearer token did not resolve");
                    return Err(AppError::authentication(INVALID_TOKEN).into());
                }
            }
        }
    };

    request.extensions_mut().insert(identity);

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));
    Ok(response)
}
