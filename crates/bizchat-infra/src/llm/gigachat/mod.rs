//! GigaChat provider: OAuth token exchange plus the completion client.

mod client;
mod token;
mod types;

pub use client::GigaChatProvider;
pub use token::TokenCache;
