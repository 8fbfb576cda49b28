//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use libris_auth::{PasswordHasher, SessionManager, TokenIssuer};
use libris_core::config::AppConfig;
use libris_core::result::AppResult;
use libris_database::{DatabasePool, TokenStore, UserStore};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db_pool: Option<DatabasePool>,
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Bearer token issuance and resolution
    pub tokens: TokenIssuer,
    /// Registration, login, and logout flows
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    /// Wires the auth services over the given stores.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
        db_pool: Option<DatabasePool>,
    ) -> AppResult<Self> {
        config.auth.validate()?;
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let issuer = TokenIssuer::new(tokens);
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&users),
            issuer.clone(),
            password_hasher,
            &config.auth,
        )?);

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            users,
            tokens: issuer,
            session_manager,
        })
    }
}
