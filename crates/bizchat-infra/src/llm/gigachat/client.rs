//! GigaChatProvider -- concrete `LlmProvider` implementation for GigaChat.
//!
//! Completion calls authenticate with a cached OAuth bearer token (see
//! [`TokenCache`]); a 401 from the completion endpoint invalidates the
//! cache and retries once with a fresh token.
//!
//! The OAuth credential is wrapped in [`secrecy::SecretString`] and this
//! struct deliberately does not derive Debug.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use bizchat_core::llm::provider::LlmProvider;
use bizchat_types::config::GigaChatConfig;
use bizchat_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderId};

use super::token::TokenCache;
use super::types::{GigaChatMessage, GigaChatRequest, GigaChatResponse};

/// Completion request timeout.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// GigaChat LLM provider.
pub struct GigaChatProvider {
    client: reqwest::Client,
    config: GigaChatConfig,
    tokens: TokenCache,
}

impl GigaChatProvider {
    /// Create a new provider; `credential` is the Basic authorization
    /// value for the OAuth exchange.
    pub fn new(config: GigaChatConfig, credential: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        let tokens = TokenCache::new(
            config.oauth_url.clone(),
            credential,
            config.scope.clone(),
        );

        Self {
            client,
            config,
            tokens,
        }
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> GigaChatRequest {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(GigaChatMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        });
        for turn in &request.history {
            messages.push(GigaChatMessage {
                role: turn.role.to_string(),
                content: turn.content.clone(),
            });
        }
        // The new user turn is appended last, after the windowed history.
        messages.push(GigaChatMessage {
            role: "user".to_string(),
            content: request.user_message.clone(),
        });

        GigaChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    async fn complete_once(&self, body: &GigaChatRequest) -> Result<CompletionResponse, LlmError> {
        let token = self.tokens.token().await?;
        let url = format!("{}/chat/completions", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LlmError::AuthenticationFailed);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: GigaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))?;

        Ok(CompletionResponse {
            content,
            model: body.model,
        })
    }
}

impl LlmProvider for GigaChatProvider {
    fn id(&self) -> ProviderId {
        ProviderId::GigaChat
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_wire_request(request);

        match self.complete_once(&body).await {
            Err(LlmError::AuthenticationFailed) => {
                // The cached token may simply have been revoked; retry
                // once with a fresh one.
                self.tokens.invalidate().await;
                self.complete_once(&body).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizchat_types::llm::{ChatTurn, MessageRole};

    fn provider() -> GigaChatProvider {
        GigaChatProvider::new(GigaChatConfig::default(), SecretString::from("Y3JlZDpzZWNyZXQ="))
    }

    #[test]
    fn test_wire_request_message_order() {
        let request = CompletionRequest {
            system: "persona".to_string(),
            history: vec![
                ChatTurn {
                    role: MessageRole::User,
                    content: "earlier question".to_string(),
                },
                ChatTurn {
                    role: MessageRole::Assistant,
                    content: "earlier answer".to_string(),
                },
            ],
            user_message: "new question".to_string(),
        };

        let wire = provider().to_wire_request(&request);

        assert_eq!(wire.messages.len(), 4);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "persona");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[2].role, "assistant");
        assert_eq!(wire.messages[3].role, "user");
        assert_eq!(wire.messages[3].content, "new question");
    }

    #[test]
    fn test_wire_request_carries_sampling_config() {
        let wire = provider().to_wire_request(&CompletionRequest {
            system: "p".to_string(),
            history: Vec::new(),
            user_message: "hi".to_string(),
        });
        assert_eq!(wire.model, "GigaChat:latest");
        assert!((wire.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(wire.max_tokens, 1000);
    }

    #[test]
    fn test_wire_request_serializes_expected_shape() {
        let wire = provider().to_wire_request(&CompletionRequest {
            system: "p".to_string(),
            history: Vec::new(),
            user_message: "hi".to_string(),
        });
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("model").is_some());
        assert!(json.get("messages").is_some());
        assert!(json.get("temperature").is_some());
        assert!(json.get("max_tokens").is_some());
    }
}
