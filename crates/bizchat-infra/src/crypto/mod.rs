//! Cryptographic implementations: password hashing and token minting.

pub mod password;
pub mod token;

pub use password::Argon2PasswordHasher;
pub use token::Sha256TokenMinter;
