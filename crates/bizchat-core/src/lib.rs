//! Business logic for the Bizchat platform.
//!
//! This crate defines the chat orchestration core (session lifecycle,
//! history windowing, prompt assembly, provider dispatch) and the account
//! and profile services, all generic over repository and crypto traits.
//! Concrete implementations live in bizchat-infra; bizchat-core never
//! depends on infrastructure.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
