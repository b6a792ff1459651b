//! Infrastructure implementations for the Bizchat platform.
//!
//! Concrete backends for the traits bizchat-core defines: SQLite
//! repositories, Argon2id password hashing, opaque token minting, and the
//! GigaChat/YandexGPT provider clients.

pub mod crypto;
pub mod llm;
pub mod sqlite;
