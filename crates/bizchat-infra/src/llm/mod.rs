//! LLM provider clients.
//!
//! Each submodule implements `LlmProvider` from `bizchat-core` for one
//! provider. Credentials are wrapped in `secrecy::SecretString` and the
//! client structs deliberately do not derive Debug.

pub mod gigachat;
pub mod yandex;

pub use gigachat::GigaChatProvider;
pub use yandex::YandexGptProvider;
