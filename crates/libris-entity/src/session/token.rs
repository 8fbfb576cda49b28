//! Bearer token value types.

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::scope::TokenScope;

/// A persisted token row. Only the SHA-256 digest of the secret is kept.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Token {
    /// SHA-256 digest of the plaintext secret.
    pub hash: Vec<u8>,
    /// The user this token authenticates.
    pub user_id: Uuid,
    /// Role-class the token is valid for.
    pub scope: TokenScope,
    /// Instant after which the token no longer resolves.
    pub expiry: DateTime<Utc>,
}

impl Token {
    /// Whether the token is still usable at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry > now
    }
}

/// A freshly issued token, carrying the plaintext secret.
///
/// This is the only value that ever holds the plaintext; it is handed to
/// the client once and dropped.
#[derive(Clone)]
pub struct IssuedToken {
    /// The plaintext bearer secret.
    pub plaintext: String,
    /// Expiry of the token.
    pub expiry: DateTime<Utc>,
    /// Owner of the token.
    pub user_id: Uuid,
    /// Scope of the token.
    pub scope: TokenScope,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("plaintext", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("user_id", &self.user_id)
            .field("scope", &self.scope)
            .finish()
    }
}
