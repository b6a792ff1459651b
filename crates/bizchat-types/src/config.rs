//! Application configuration types for Bizchat.
//!
//! `AppConfig` represents the top-level `config.toml`. Every field has a
//! sensible default so an empty file (or no file) yields a working
//! development setup. Secrets (provider credentials) are never part of
//! the file; they are read from the environment at wiring time.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderId;

/// Top-level configuration for the Bizchat service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub gigachat: GigaChatConfig,

    #[serde(default)]
    pub yandexgpt: YandexGptConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Chat orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// How many recent messages are included as prompt context.
    #[serde(default = "default_history_window")]
    pub history_window: u32,

    /// Provider used when the caller does not name one.
    #[serde(default = "default_provider")]
    pub default_provider: ProviderId,
}

fn default_history_window() -> u32 {
    10
}

fn default_provider() -> ProviderId {
    ProviderId::GigaChat
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            default_provider: default_provider(),
        }
    }
}

/// Access token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of issued access tokens, in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_token_ttl_secs() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

/// GigaChat provider settings (credential comes from
/// `GIGACHAT_AUTH_CREDENTIALS` in the environment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GigaChatConfig {
    #[serde(default = "default_gigachat_oauth_url")]
    pub oauth_url: String,

    #[serde(default = "default_gigachat_api_url")]
    pub api_url: String,

    #[serde(default = "default_gigachat_scope")]
    pub scope: String,

    #[serde(default = "default_gigachat_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_gigachat_oauth_url() -> String {
    "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".to_string()
}

fn default_gigachat_api_url() -> String {
    "https://gigachat.devices.sberbank.ru/api/v1".to_string()
}

fn default_gigachat_scope() -> String {
    "GIGACHAT_API_PERS".to_string()
}

fn default_gigachat_model() -> String {
    "GigaChat:latest".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

impl Default for GigaChatConfig {
    fn default() -> Self {
        Self {
            oauth_url: default_gigachat_oauth_url(),
            api_url: default_gigachat_api_url(),
            scope: default_gigachat_scope(),
            model: default_gigachat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// YandexGPT provider settings (API key comes from `YANDEX_API_KEY` in the
/// environment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexGptConfig {
    #[serde(default = "default_yandex_api_url")]
    pub api_url: String,

    /// Yandex Cloud folder the model URI is scoped to.
    #[serde(default)]
    pub folder_id: String,

    #[serde(default = "default_yandex_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_yandex_api_url() -> String {
    "https://llm.api.cloud.yandex.net/foundationModels/v1/completion".to_string()
}

fn default_yandex_model() -> String {
    "yandexgpt-lite".to_string()
}

impl Default for YandexGptConfig {
    fn default() -> Self {
        Self {
            api_url: default_yandex_api_url(),
            folder_id: String::new(),
            model: default_yandex_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.chat.history_window, 10);
        assert_eq!(config.chat.default_provider, ProviderId::GigaChat);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.gigachat.model, "GigaChat:latest");
    }

    #[test]
    fn test_partial_config_overrides() {
        let toml_str = r#"
[chat]
history_window = 20
default_provider = "yandexgpt"

[yandexgpt]
folder_id = "b1gexample"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.history_window, 20);
        assert_eq!(config.chat.default_provider, ProviderId::YandexGpt);
        assert_eq!(config.yandexgpt.folder_id, "b1gexample");
        // Untouched sections keep their defaults.
        assert_eq!(config.server.host, "127.0.0.1");
        assert!((config.gigachat.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.gigachat.scope, "GIGACHAT_API_PERS");
    }
}
