//! Password hashing seam.
//!
//! The trait lives here so bizchat-core stays free of crypto crates; the
//! Argon2id implementation is in bizchat-infra.

/// Hashes and verifies user passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string.
    fn hash_password(&self, password: &str) -> Result<String, String>;

    /// Verify a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}
