//! SQLite-backed repository implementations.

pub mod account;
pub mod chat;
pub mod pool;
pub mod profile;

pub use account::SqliteAccountRepository;
pub use chat::SqliteChatRepository;
pub use pool::DatabasePool;
pub use profile::SqliteProfileRepository;
