//! LLM request/response types for Bizchat.
//!
//! These types model provider interactions: the provider set, completion
//! requests built from conversation history, and error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single role/content pair within a conversation, as handed to providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

/// A provider-agnostic completion request.
///
/// History is carried as structured turns end-to-end; the new user turn is
/// kept separate from the windowed history so providers can append it last
/// without double-counting it. Sampling parameters (temperature, output
/// cap) are provider configuration, not part of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub history: Vec<ChatTurn>,
    pub user_message: String,
}

/// Response from a provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    /// Model identifier the provider reports, when it reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider error: HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request timed out")]
    Timeout,
}

/// The closed set of supported LLM providers.
///
/// Adding a provider means adding a variant here and registering a client
/// for it; business logic never branches on provider name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    GigaChat,
    YandexGpt,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::GigaChat => write!(f, "gigachat"),
            ProviderId::YandexGpt => write!(f, "yandexgpt"),
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gigachat" => Ok(ProviderId::GigaChat),
            "yandexgpt" => Ok(ProviderId::YandexGpt),
            other => Err(format!("unknown provider: '{other}'")),
        }
    }
}
