//! Provider dispatch with the uniform degrade-to-fallback contract.
//!
//! A provider outage must cost one visibly degraded chat turn, never a
//! failed request: every `LlmError` is logged at the dispatch boundary
//! and converted into deterministic fallback text that callers (and
//! transports) can recognize by its prefix.

use std::collections::HashMap;

use bizchat_types::llm::{CompletionRequest, ProviderId};
use tracing::warn;

use super::box_provider::BoxLlmProvider;

/// Marker prefix of every fallback reply.
///
/// Stable contract: transports and tests distinguish degraded turns from
/// genuine model output by this prefix.
pub const FALLBACK_PREFIX: &str = "[assistant unavailable]";

/// Whether `content` is a fallback reply rather than genuine model output.
pub fn is_fallback_reply(content: &str) -> bool {
    content.starts_with(FALLBACK_PREFIX)
}

fn fallback_text() -> String {
    format!("{FALLBACK_PREFIX} The assistant could not respond right now. Please try again in a moment.")
}

/// Registry of provider clients with a configured default.
pub struct ProviderDispatcher {
    providers: HashMap<ProviderId, BoxLlmProvider>,
    default_provider: ProviderId,
}

impl ProviderDispatcher {
    /// Create an empty dispatcher with the given default provider.
    pub fn new(default_provider: ProviderId) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider,
        }
    }

    /// Register a provider client. An existing client for the same
    /// provider is replaced.
    pub fn register(&mut self, provider: BoxLlmProvider) {
        self.providers.insert(provider.id(), provider);
    }

    /// The provider used when the caller does not name one.
    pub fn default_provider(&self) -> ProviderId {
        self.default_provider
    }

    /// List the registered providers.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.providers.keys().copied().collect()
    }

    /// Perform one completion, selecting the provider by explicit choice
    /// or falling back to the default.
    ///
    /// Never fails: transport, authentication, and malformed-response
    /// errors are logged here and replaced by fallback text so the chat
    /// turn stays usable.
    pub async fn dispatch(
        &self,
        provider: Option<ProviderId>,
        request: &CompletionRequest,
    ) -> String {
        let provider_id = provider.unwrap_or(self.default_provider);

        let Some(client) = self.providers.get(&provider_id) else {
            warn!(provider = %provider_id, "dispatch to unregistered provider");
            return fallback_text();
        };

        match client.complete(request).await {
            Ok(response) => response.content,
            Err(error) => {
                warn!(provider = %provider_id, %error, "provider completion failed");
                fallback_text()
            }
        }
    }
}
