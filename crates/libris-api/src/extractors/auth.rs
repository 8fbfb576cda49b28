//! Extractor for the identity bound by the authentication middleware.
//!
//! It never touches the token store; it only reads what
//! [`crate::middleware::auth::authenticate`] put into the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use libris_auth::rbac::guard;
use libris_entity::session::{AuthenticatedUser, Identity};

use crate::error::ApiError;

/// An authenticated caller. Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedUser;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .cloned()
            .unwrap_or_default();
        let caller = guard::require_user(&identity)?;
        Ok(Self(caller.clone()))
    }
}
