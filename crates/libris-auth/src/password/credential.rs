//! A user's stored password credential.

use std::fmt;

use libris_core::error::AppError;
use libris_core::result::AppResult;

use super::hasher::PasswordHasher;

/// The persisted half of a password: its Argon2id hash.
///
/// The plaintext only ever passes through [`Credential::set`] and
/// [`Credential::matches`]; it is never held.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: String,
}

impl Credential {
    /// Hash `plaintext` into a new credential.
    pub fn set(hasher: &PasswordHasher, plaintext: &str) -> AppResult<Self> {
        let hash = hasher.hash_password(plaintext)?;
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage. An empty hash is an internal error.
    pub fn from_hash(hash: impl Into<String>) -> AppResult<Self> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(AppError::internal("Stored password hash is empty"));
        }
        Ok(Self { hash })
    }

    /// Check a candidate password.
    ///
    /// `Ok(false)` is an ordinary mismatch; `Err` means verification itself
    /// could not run.
    pub fn matches(&self, hasher: &PasswordHasher, candidate: &str) -> AppResult<bool> {
        hasher.verify_password(candidate, &self.hash)
    }

    /// The stored PHC hash string.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Consume the credential, yielding the hash for persistence.
    pub fn into_hash(self) -> String {
        self.hash
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("hash", &"<redacted>").finish()
    }
}
