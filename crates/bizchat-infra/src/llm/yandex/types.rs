//! Wire types for the Yandex Foundation Models completion endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexRequest {
    pub model_uri: String,
    pub completion_options: YandexCompletionOptions,
    pub messages: Vec<YandexMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexCompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct YandexMessage {
    pub role: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct YandexResponse {
    pub result: YandexResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexResult {
    pub alternatives: Vec<YandexAlternative>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct YandexAlternative {
    pub message: YandexResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct YandexResponseMessage {
    pub text: String,
}
