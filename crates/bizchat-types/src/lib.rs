//! Shared domain types for the Bizchat platform.
//!
//! This crate has no infrastructure dependencies: it defines the data
//! shapes (users, profiles, sessions, messages, LLM requests), the error
//! taxonomy, and the configuration types that every other crate builds on.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod llm;
