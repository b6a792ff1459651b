//! Access token minting seam.
//!
//! Tokens are opaque random strings; only their hash is ever persisted.
//! The random generator and hash function live in bizchat-infra.

/// A freshly minted token: the plaintext handed to the client once, and
/// the hash that goes into storage.
pub struct MintedToken {
    pub plaintext: String,
    pub hash: String,
}

/// Mints and hashes opaque access tokens.
pub trait TokenMinter: Send + Sync {
    /// Generate a new token and its storage hash.
    fn mint(&self) -> MintedToken;

    /// Hash a presented token for lookup against storage.
    fn hash(&self, token: &str) -> String;
}
