//! LlmProvider trait definition.
//!
//! The core abstraction every provider client implements. Uses native
//! async fn in traits (RPITIT, Rust 2024 edition); implementations live
//! in bizchat-infra (e.g., `GigaChatProvider`, `YandexGptProvider`).

use bizchat_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderId};

/// Trait for LLM provider backends.
///
/// A provider authenticates itself and performs a single completion call
/// for an assembled request. Sampling parameters and model selection are
/// provider configuration, so the request carries only conversation
/// content.
pub trait LlmProvider: Send + Sync {
    /// Which member of the closed provider set this client serves.
    fn id(&self) -> ProviderId;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
