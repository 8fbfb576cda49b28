//! Route-level guards, applied with `route_layer`.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use libris_auth::rbac::guard;
use libris_entity::session::Identity;

use crate::error::ApiError;

fn identity(request: &Request) -> &Identity {
    static ANONYMOUS: Identity = Identity::Anonymous;
    request.extensions().get::<Identity>().unwrap_or(&ANONYMOUS)
}

/// Rejects anonymous callers with 401.
pub async fn require_user(request: Request, next: Next) -> Result<Response, ApiError> {
    guard::require_user(identity(&request))?;
    Ok(next.run(request).await)
}

/// Rejects anonymous callers with 401 and non-admins with 403.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    guard::require_admin(identity(&request))?;
    Ok(next.run(request).await)
}
