//! Chat orchestration: session lifecycle, history windowing, prompt
//! assembly, and message persistence.

pub mod prompt;
pub mod repository;
pub mod service;
pub mod window;
