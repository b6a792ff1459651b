//! Wire types for the GigaChat OAuth and completion endpoints.

use serde::{Deserialize, Serialize};

/// OAuth exchange response.
///
/// `expires_at` is milliseconds since the Unix epoch; GigaChat omits it
/// on some plans, in which case the cache falls back to a fixed TTL.
#[derive(Debug, Deserialize)]
pub struct OauthResponse {
    pub access_token: String,
    pub expires_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GigaChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct GigaChatRequest {
    pub model: String,
    pub messages: Vec<GigaChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct GigaChatResponse {
    pub choices: Vec<GigaChatChoice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GigaChatChoice {
    pub message: GigaChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct GigaChatResponseMessage {
    pub content: String,
}
