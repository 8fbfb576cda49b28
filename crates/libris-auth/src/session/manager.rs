//! Session lifecycle manager: registration, login, and logout flows.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use libris_core::config::AuthConfig;
use libris_core::error::AppError;
use libris_core::result::AppResult;
use libris_database::UserStore;
use libris_entity::session::{AuthenticatedUser, IssuedToken, TokenScope};
use libris_entity::user::{AccountRole, CreateUser, User};

use crate::password::{Credential, PasswordHasher};
use crate::token::TokenIssuer;

/// Input for registering a new account. The password is plaintext here and
/// is hashed before anything is stored.
#[derive(Clone)]
pub struct NewAccount {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Account role.
    pub role: AccountRole,
    /// Postal address.
    pub address: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Token issuance and revocation.
    issuer: TokenIssuer,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Lifetime of newly issued tokens.
    token_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    ///
    /// Fails with a configuration error if the token lifetime is unusable.
    pub fn new(
        users: Arc<dyn UserStore>,
        issuer: TokenIssuer,
        password_hasher: Arc<PasswordHasher>,
        auth_config: &AuthConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            users,
            issuer,
            password_hasher,
            token_ttl: auth_config.token_ttl()?,
        })
    }

    /// The token issuer backing this manager.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Registers a new account, hashing its password.
    pub async fn register(&self, account: NewAccount) -> AppResult<User> {
        let credential = Credential::set(&self.password_hasher, &account.password)?;

        let user = self
            .users
            .insert(&CreateUser {
                username: account.username,
                email: account.email,
                password_hash: credential.into_hash(),
                role: account.role,
                address: account.address,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a token scoped to the user's role.
    ///
    /// Unknown usernames and wrong passwords both yield the same
    /// authentication error and leave the store untouched.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!(username = %username, "Login for unknown user");
            return Err(AppError::authentication("invalid credentials"));
        };

        let credential = Credential::from_hash(user.password_hash.as_str())?;
        if !credential.matches(&self.password_hasher, password)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::authentication("invalid credentials"));
        }

        let scope = TokenScope::from(user.role);
        let issued = self
            .issuer
            .create_new_token(user.id, self.token_ttl, scope)
            .await?;

        info!(user_id = %user.id, scope = %scope, "Login successful");
        Ok(issued)
    }

    /// Revokes the caller's tokens in the scope they presented and in the
    /// scope of their current role.
    ///
    /// The two differ only for tokens issued before a role change.
    pub async fn logout(&self, caller: &AuthenticatedUser) -> AppResult<()> {
        let role_scope = TokenScope::from(caller.user.role);

        self.issuer
            .delete_all_tokens_for_user(caller.user_id(), caller.scope)
            .await?;
        if role_scope != caller.scope {
            self.issuer
                .delete_all_tokens_for_user(caller.user_id(), role_scope)
                .await?;
        }

        info!(user_id = %caller.user_id(), "Logout");
        Ok(())
    }
}
