//! Authorization guards.
//!
//! Both guards are pure: they inspect an [`Identity`] and never touch
//! persistence.

use libris_core::error::AppError;
use libris_core::result::AppResult;
use libris_entity::session::{AuthenticatedUser, Identity};

/// Require a non-anonymous identity.
pub fn require_user(identity: &Identity) -> AppResult<&AuthenticatedUser> {
    identity
        .user()
        .ok_or_else(|| AppError::authentication("you must be logged in"))
}

/// Require an admin-scoped token belonging to a user whose role is admin.
///
/// Anonymous callers fail as in [`require_user`].
pub fn require_admin(identity: &Identity) -> AppResult<&AuthenticatedUser> {
    let caller = require_user(identity)?;
    if caller.is_admin() {
        Ok(caller)
    } else {
        Err(AppError::authorization("not authorized"))
    }
}
