//! Token issuance, resolution, and revocation over a [`TokenStore`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use libris_core::error::AppError;
use libris_core::result::AppResult;
use libris_database::TokenStore;
use libris_entity::session::{AuthenticatedUser, IssuedToken, Token, TokenScope};
use libris_entity::user::User;

use super::generator::{generate_secret, hash_secret};

/// Issues and resolves opaque bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    store: Arc<dyn TokenStore>,
}

impl TokenIssuer {
    /// Creates an issuer over the given token store.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Generate a new token for `user_id`, persist its hash, and return the
    /// plaintext. The plaintext is not recoverable afterwards.
    pub async fn create_new_token(
        &self,
        user_id: Uuid,
        ttl: Duration,
        scope: TokenScope,
    ) -> AppResult<IssuedToken> {
        let expiry = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| AppError::internal(format!("Token TTL out of range: {ttl:?}")))?;
        let plaintext = generate_secret();

        let token = Token {
            hash: hash_secret(&plaintext),
            user_id,
            scope,
            expiry,
        };
        self.store.insert(&token).await?;

        debug!(user_id = %user_id, scope = %scope, expiry = %expiry, "Issued token");

        Ok(IssuedToken {
            plaintext,
            expiry,
            user_id,
            scope,
        })
    }

    /// Resolve a plaintext secret to its owner within `scope`.
    ///
    /// Unknown, expired, or wrong-scope secrets are `Ok(None)`.
    pub async fn resolve_token(&self, secret: &str, scope: TokenScope) -> AppResult<Option<User>> {
        let hash = hash_secret(secret);
        self.store.find_user_by_token(&hash, scope, Utc::now()).await
    }

    /// Resolve a secret without knowing its scope up front, trying each
    /// scope in turn.
    pub async fn resolve_any_scope(&self, secret: &str) -> AppResult<Option<AuthenticatedUser>> {
        for scope in TokenScope::ALL {
            if let Some(user) = self.resolve_token(secret, scope).await? {
                return Ok(Some(AuthenticatedUser { user, scope }));
            }
        }
        Ok(None)
    }

    /// Revoke every token of `user_id` in `scope`. Revoking nothing is fine.
    pub async fn delete_all_tokens_for_user(
        &self,
        user_id: Uuid,
        scope: TokenScope,
    ) -> AppResult<()> {
        let removed = self.store.delete_all_for_user(user_id, scope).await?;
        info!(user_id = %user_id, scope = %scope, removed, "Revoked user tokens");
        Ok(())
    }

    /// Remove expired token rows. Returns how many were deleted.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        self.store.delete_expired(Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_database::{MemoryStore, UserStore};
    use libris_entity::user::{AccountRole, CreateUser};

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    async fn setup() -> (MemoryStore, TokenIssuer, User) {
        let store = MemoryStore::new();
        let user = UserStore::insert(
            &store,
            &CreateUser {
                username: "alice".to_string(),
                email: "a@b.com".to_string(),
                password_hash: "hash".to_string(),
                role: AccountRole::User,
                address: "x".to_string(),
            },
        )
        .await
        .unwrap();
        let issuer = TokenIssuer::new(Arc::new(store.clone()));
        (store, issuer, user)
    }

    #[tokio::test]
    async fn test_issue_then_resolve() {
        let (_, issuer, user) = setup().await;
        let before = Utc::now();
        let issued = issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();

        assert!(!issued.plaintext.is_empty());
        let ttl = issued.expiry - before;
        assert!(ttl >= chrono::Duration::hours(24));
        assert!(ttl < chrono::Duration::hours(24) + chrono::Duration::minutes(1));

        let owner = issuer
            .resolve_token(&issued.plaintext, TokenScope::User)
            .await
            .unwrap();
        assert_eq!(owner.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_plaintext_is_not_stored() {
        let (store, issuer, user) = setup().await;
        let issued = issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains(&issued.plaintext));
    }

    #[tokio::test]
    async fn test_wrong_scope_does_not_resolve() {
        let (_, issuer, user) = setup().await;
        let issued = issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();
        assert!(issuer
            .resolve_token(&issued.plaintext, TokenScope::Admin)
            .await
            .unwrap()
            .is_none());

        let resolved = issuer.resolve_any_scope(&issued.plaintext).await.unwrap();
        assert_eq!(resolved.map(|r| r.scope), Some(TokenScope::User));
    }

    #[tokio::test]
    async fn test_expired_token_does_not_resolve() {
        let (_, issuer, user) = setup().await;
        let issued = issuer
            .create_new_token(user.id, Duration::ZERO, TokenScope::User)
            .await
            .unwrap();
        assert!(issuer
            .resolve_token(&issued.plaintext, TokenScope::User)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_token_expires_after_ttl() {
        let (_, issuer, user) = setup().await;
        let issued = issuer
            .create_new_token(user.id, Duration::from_millis(50), TokenScope::User)
            .await
            .unwrap();
        assert!(issuer
            .resolve_token(&issued.plaintext, TokenScope::User)
            .await
            .unwrap()
            .is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(issuer
            .resolve_token(&issued.plaintext, TokenScope::User)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_tampered_secret_never_matches() {
        let (_, issuer, user) = setup().await;
        let issued = issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();

        let bytes = issued.plaintext.as_bytes();
        for index in [0, 1, bytes.len() / 2, bytes.len() - 1] {
            let mut mutated = bytes.to_vec();
            mutated[index] ^= 0x01;
            let mutated = String::from_utf8(mutated).unwrap();
            assert_ne!(mutated, issued.plaintext);
            assert!(issuer.resolve_any_scope(&mutated).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_revocation_is_total_and_idempotent() {
        let (_, issuer, user) = setup().await;
        let first = issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();
        let second = issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();

        issuer
            .delete_all_tokens_for_user(user.id, TokenScope::User)
            .await
            .unwrap();
        issuer
            .delete_all_tokens_for_user(user.id, TokenScope::User)
            .await
            .unwrap();

        for token in [first, second] {
            assert!(issuer
                .resolve_token(&token.plaintext, TokenScope::User)
                .await
                .unwrap()
                .is_none());
        }
    }

    #[tokio::test]
    async fn test_unrepresentable_expiry_is_error() {
        let (store, issuer, user) = setup().await;
        let forever = Duration::from_secs(3_000_000_000 * 3600);
        for ttl in [forever, Duration::MAX] {
            let err = issuer
                .create_new_token(user.id, ttl, TokenScope::User)
                .await
                .unwrap_err();
            assert_eq!(err.kind, libris_core::error::ErrorKind::Internal);
        }
        assert_eq!(store.token_count().await, 0);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (store, issuer, user) = setup().await;
        issuer
            .create_new_token(user.id, Duration::ZERO, TokenScope::User)
            .await
            .unwrap();
        issuer
            .create_new_token(user.id, DAY, TokenScope::User)
            .await
            .unwrap();

        assert_eq!(issuer.purge_expired().await.unwrap(), 1);
        assert_eq!(store.token_count().await, 1);
    }
}
