//! Opaque bearer tokens: generation, hashing, and persistence.

pub mod generator;
pub mod issuer;

pub use generator::{TOKEN_LENGTH, generate_secret, hash_secret, is_well_formed};
pub use issuer::TokenIssuer;
