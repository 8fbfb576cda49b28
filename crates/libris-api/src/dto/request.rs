//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(
        min = 1,
        max = 50,
        message = "username must be provided and not be more than 50 characters long"
    ))]
    pub username: String,
    /// Email.
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "password must be provided"))]
    pub password: String,
    /// Account type, `user` or `admin`.
    #[validate(length(min = 1, message = "account_type must be provided"))]
    pub account_type: String,
    /// Postal address.
    #[validate(length(min = 1, message = "address must be provided"))]
    pub address: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .finish_non_exhaustive()
    }
}

/// Login request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "username must be provided"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "password must be provided"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
