//! Bearer secret generation and hashing.

use base64::{Engine as _, engine::general_purpose};
use rand::prelude::RngExt;
use rand::rng;
use sha2::{Digest, Sha256};

/// Random bytes per secret (256 bits).
const SECRET_BYTES: usize = 32;

/// Length of an encoded secret: 32 bytes as unpadded base64url.
pub const TOKEN_LENGTH: usize = 43;

/// Generate a fresh plaintext bearer secret.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rng().fill(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 digest of a plaintext secret, as stored.
pub fn hash_secret(secret: &str) -> Vec<u8> {
    Sha256::digest(secret.as_bytes()).to_vec()
}

/// Whether `secret` has the shape of a generated token.
pub fn is_well_formed(secret: &str) -> bool {
    secret.len() == TOKEN_LENGTH
        && secret
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
