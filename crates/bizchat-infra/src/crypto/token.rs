//! Opaque access token minting.
//!
//! Implements the `TokenMinter` trait from `bizchat-core`. Tokens are
//! `bzc_` followed by 32 random bytes hex-encoded; storage only ever sees
//! the SHA-256 hash, so a leaked database does not leak usable tokens.

use rand::RngCore;
use sha2::{Digest, Sha256};

use bizchat_core::service::token::{MintedToken, TokenMinter};

/// Prefix that makes a Bizchat token recognizable in logs and secret
/// scanners without revealing anything about its contents.
const TOKEN_PREFIX: &str = "bzc_";

/// SHA-256-hashing implementation of `TokenMinter`.
pub struct Sha256TokenMinter;

impl Sha256TokenMinter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256TokenMinter {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl TokenMinter for Sha256TokenMinter {
    fn mint(&self) -> MintedToken {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let plaintext = format!("{TOKEN_PREFIX}{}", hex_encode(&bytes));
        let hash = self.hash(&plaintext);
        MintedToken { plaintext, hash }
    }

    fn hash(&self, token: &str) -> String {
        let digest = Sha256::digest(token.as_bytes());
        format!("{digest:x}")
    }
}
