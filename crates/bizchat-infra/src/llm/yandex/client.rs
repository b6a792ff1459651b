//! YandexGptProvider -- concrete `LlmProvider` implementation for the
//! Yandex Foundation Models API.
//!
//! The wire shape allows one system turn plus free-text turns; windowed
//! history is flattened into a single user turn (see
//! `bizchat_core::chat::prompt::flatten_turns`) and the flattened text is
//! never parsed back into roles.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and this struct
//! deliberately does not derive Debug.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use bizchat_core::chat::prompt::flatten_turns;
use bizchat_core::llm::provider::LlmProvider;
use bizchat_types::config::YandexGptConfig;
use bizchat_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderId};

use super::types::{YandexCompletionOptions, YandexMessage, YandexRequest, YandexResponse};

/// Completion request timeout.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// YandexGPT LLM provider.
pub struct YandexGptProvider {
    client: reqwest::Client,
    config: YandexGptConfig,
    api_key: SecretString,
}

impl YandexGptProvider {
    pub fn new(config: YandexGptConfig, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            config,
            api_key,
        }
    }

    fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.config.folder_id, self.config.model)
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> YandexRequest {
        // One system turn, then a single user turn: flattened history
        // (when any) followed by the new message.
        let user_text = if request.history.is_empty() {
            request.user_message.clone()
        } else {
            format!(
                "{}\nuser: {}",
                flatten_turns(&request.history),
                request.user_message
            )
        };

        YandexRequest {
            model_uri: self.model_uri(),
            completion_options: YandexCompletionOptions {
                stream: false,
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
            messages: vec![
                YandexMessage {
                    role: "system".to_string(),
                    text: request.system.clone(),
                },
                YandexMessage {
                    role: "user".to_string(),
                    text: user_text,
                },
            ],
        }
    }
}

impl LlmProvider for YandexGptProvider {
    fn id(&self) -> ProviderId {
        ProviderId::YandexGpt
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if self.config.folder_id.is_empty() {
            return Err(LlmError::NotConfigured(
                "yandexgpt folder_id is empty".to_string(),
            ));
        }

        let body = self.to_wire_request(request);

        let response = self
            .client
            .post(&self.config.api_url)
            .header(
                "Authorization",
                format!("Api-Key {}", self.api_key.expose_secret()),
            )
            .json(&body)
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

        let body: YandexResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let content = body
            .result
            .alternatives
            .into_iter()
            .next()
            .map(|a| a.message.text)
            .ok_or_else(|| {
                LlmError::MalformedResponse("response has no alternatives".to_string())
            })?;

        Ok(CompletionResponse {
            content,
            model: body.result.model_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizchat_types::llm::{ChatTurn, MessageRole};

    fn provider() -> YandexGptProvider {
        let config = YandexGptConfig {
            folder_id: "b1gexample".to_string(),
            ..YandexGptConfig::default()
        };
        YandexGptProvider::new(config, SecretString::from("key"))
    }

    #[test]
    fn test_model_uri() {
        assert_eq!(provider().model_uri(), "gpt://b1gexample/yandexgpt-lite");
    }

    #[test]
    fn test_wire_request_without_history() {
        let wire = provider().to_wire_request(&CompletionRequest {
            system: "persona".to_string(),
            history: Vec::new(),
            user_message: "hello".to_string(),
        });

        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[1].text, "hello");
        assert!(!wire.completion_options.stream);
    }

    #[test]
    fn test_wire_request_flattens_history() {
        let wire = provider().to_wire_request(&CompletionRequest {
            system: "persona".to_string(),
            history: vec![
                ChatTurn {
                    role: MessageRole::User,
                    content: "first".to_string(),
                },
                ChatTurn {
                    role: MessageRole::Assistant,
                    content: "second".to_string(),
                },
            ],
            user_message: "third".to_string(),
        });

        assert_eq!(
            wire.messages[1].text,
            "user: first\nassistant: second\nuser: third"
        );
    }

    #[test]
    fn test_wire_request_camel_case_fields() {
        let wire = provider().to_wire_request(&CompletionRequest {
            system: "p".to_string(),
            history: Vec::new(),
            user_message: "hi".to_string(),
        });
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("modelUri").is_some());
        assert!(json["completionOptions"].get("maxTokens").is_some());
    }

    #[tokio::test]
    async fn test_missing_folder_id_is_not_configured() {
        let provider = YandexGptProvider::new(YandexGptConfig::default(), SecretString::from("k"));
        let err = provider
            .complete(&CompletionRequest {
                system: "p".to_string(),
                history: Vec::new(),
                user_message: "hi".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured(_)));
    }
}
