//! Per-request identity bound by the authentication middleware.

use uuid::Uuid;

use super::scope::TokenScope;
use crate::user::User;

/// A user resolved from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The token's owner as currently stored.
    pub user: User,
    /// The scope the presented token was issued with.
    pub scope: TokenScope,
}

impl AuthenticatedUser {
    /// The owner's user ID.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Admin privileges require both an admin-scoped token and a user whose
    /// role is still admin.
    pub fn is_admin(&self) -> bool {
        self.scope == TokenScope::Admin && self.user.is_admin()
    }
}

/// Who is making the current request.
#[derive(Debug, Clone, Default)]
pub enum Identity {
    /// No bearer token was presented.
    #[default]
    Anonymous,
    /// A bearer token resolved to a user.
    Authenticated(AuthenticatedUser),
}

impl Identity {
    /// Whether no user is bound.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The bound user, if any.
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}
