//! In-memory user and token store backed by a Tokio `RwLock`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use libris_core::crypto::constant_time_eq;
use libris_core::error::AppError;
use libris_core::result::AppResult;
use libris_entity::session::{Token, TokenScope};
use libris_entity::user::{CreateUser, User};

use crate::store::{TokenStore, UserStore};

#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<Uuid, User>,
    tokens: Vec<Token>,
}

/// Process-local store implementing both [`UserStore`] and [`TokenStore`].
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of token rows currently held, expired ones included.
    pub async fn token_count(&self) -> usize {
        self.state.read().await.tokens.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.username == data.username) {
            return Err(AppError::conflict(format!(
                "username '{}' is already taken",
                data.username
            )));
        }
        if state.users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict("email is already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn insert(&self, token: &Token) -> AppResult<()> {
        self.state.write().await.tokens.push(token.clone());
        Ok(())
    }

    async fn find_user_by_token(
        &self,
        hash: &[u8],
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        let owner = state
            .tokens
            .iter()
            .find(|t| t.scope == scope && t.is_valid_at(now) && constant_time_eq(&t.hash, hash))
            .and_then(|t| state.users.get(&t.user_id))
            .cloned();
        Ok(owner)
    }

    async fn delete_all_for_user(&self, user_id: Uuid, scope: TokenScope) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.tokens.len();
        state
            .tokens
            .retain(|t| !(t.user_id == user_id && t.scope == scope));
        let removed = (before - state.tokens.len()) as u64;
        debug!(user_id = %user_id, scope = %scope, removed, "Deleted user tokens");
        Ok(removed)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.tokens.len();
        state.tokens.retain(|t| t.is_valid_at(now));
        Ok((before - state.tokens.len()) as u64)
    }
}
