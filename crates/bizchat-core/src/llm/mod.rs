//! LLM provider abstraction and dispatch.
//!
//! `LlmProvider` is the capability trait provider clients implement;
//! `BoxLlmProvider` erases it for runtime selection; `ProviderDispatcher`
//! applies the uniform degrade-to-fallback error contract.

pub mod box_provider;
pub mod dispatcher;
pub mod provider;

pub use box_provider::BoxLlmProvider;
pub use dispatcher::{is_fallback_reply, ProviderDispatcher, FALLBACK_PREFIX};
pub use provider::LlmProvider;
