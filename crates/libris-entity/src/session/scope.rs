//! Token scope enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::AccountRole;

/// The role-class a bearer token is authorized for.
///
/// Fixed at issuance from the user's [`AccountRole`]; a later role change
/// does not rewrite the scope of tokens already issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "token_scope", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// Regular user session.
    User,
    /// Administrator session.
    Admin,
}

impl TokenScope {
    /// Every scope, in resolution order.
    pub const ALL: [TokenScope; 2] = [TokenScope::User, TokenScope::Admin];

    /// Return the scope as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl From<AccountRole> for TokenScope {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::User => Self::User,
            AccountRole::Admin => Self::Admin,
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
