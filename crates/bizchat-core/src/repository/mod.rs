//! Repository trait definitions for accounts and business profiles.
//!
//! The chat repository lives with the chat module (`chat::repository`).

pub mod account;
pub mod profile;

pub use account::AccountRepository;
pub use profile::ProfileRepository;
