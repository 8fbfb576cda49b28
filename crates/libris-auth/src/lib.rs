//! # libris-auth
//!
//! Authentication and authorization core for the Libris API.
//!
//! ## Modules
//!
//! - `password` — Argon2id credential hashing and verification
//! - `token` — Opaque bearer token generation, hashing, and persistence
//! - `session` — Registration, login, and logout flows
//! - `rbac` — Request-level guards over the bound identity

pub mod password;
pub mod rbac;
pub mod session;
pub mod token;

pub use password::{Credential, PasswordHasher};
pub use rbac::{require_admin, require_user};
pub use session::{NewAccount, SessionManager};
pub use token::TokenIssuer;
