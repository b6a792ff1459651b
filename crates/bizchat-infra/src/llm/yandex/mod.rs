//! YandexGPT provider client.

mod client;
mod types;

pub use client::YandexGptProvider;
