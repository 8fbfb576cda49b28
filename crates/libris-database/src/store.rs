//! Persistence traits consumed by the auth layer.
//!
//! Two implementations exist: [`crate::repositories`] for PostgreSQL and
//! [`crate::memory::MemoryStore`] for single-process deployments and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use libris_core::result::AppResult;
use libris_entity::session::{Token, TokenScope};
use libris_entity::user::{CreateUser, User};

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Insert a new user. Duplicate usernames or emails yield a conflict.
    async fn insert(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Token hash persistence.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Persist a token row.
    async fn insert(&self, token: &Token) -> AppResult<()>;

    /// Return the owner of the token whose hash and scope match and whose
    /// expiry is after `now`. A miss is `Ok(None)`.
    async fn find_user_by_token(
        &self,
        hash: &[u8],
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    /// Delete every token of `user_id` in `scope`, returning how many went.
    async fn delete_all_for_user(&self, user_id: Uuid, scope: TokenScope) -> AppResult<u64>;

    /// Delete every token whose expiry is at or before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
