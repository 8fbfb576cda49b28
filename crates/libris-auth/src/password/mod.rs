//! Password hashing and credential verification.

pub mod credential;
pub mod hasher;

pub use credential::Credential;
pub use hasher::PasswordHasher;
