//! Argon2id password hashing.
//!
//! Implements the `PasswordHasher` trait from `bizchat-core` using the
//! `argon2` crate (RustCrypto ecosystem). Hashes are self-describing PHC
//! strings, so parameters can change without invalidating stored hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use bizchat_core::service::password::PasswordHasher;

/// Argon2id implementation of `PasswordHasher`.
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new hasher with the crate's default parameters
    /// (Argon2id v19, OWASP-recommended memory/iteration settings).
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| e.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
