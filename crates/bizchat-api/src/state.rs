//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI
//! commands and REST API handlers. Services are generic over repository
//! and crypto traits, but AppState pins them to the concrete infra
//! implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use bizchat_core::chat::service::ChatService;
use bizchat_core::llm::{BoxLlmProvider, ProviderDispatcher};
use bizchat_core::service::account::AccountService;
use bizchat_core::service::profile::ProfileService;
use bizchat_infra::crypto::{Argon2PasswordHasher, Sha256TokenMinter};
use bizchat_infra::llm::{GigaChatProvider, YandexGptProvider};
use bizchat_infra::sqlite::{
    DatabasePool, SqliteAccountRepository, SqliteChatRepository, SqliteProfileRepository,
};
use bizchat_types::config::AppConfig;
use bizchat_types::llm::ProviderId;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteAccountService =
    AccountService<SqliteAccountRepository, Argon2PasswordHasher, Sha256TokenMinter>;

pub type ConcreteProfileService = ProfileService<SqliteProfileRepository>;

pub type ConcreteChatService = ChatService<SqliteChatRepository, SqliteProfileRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<ConcreteAccountService>,
    pub profile_service: Arc<ConcreteProfileService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, build
    /// the provider dispatcher, wire services.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("bizchat.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let dispatcher = Arc::new(build_dispatcher(&config));

        let account_service = AccountService::new(
            SqliteAccountRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            Sha256TokenMinter::new(),
            config.auth.token_ttl_secs,
        );

        let profile_service = ProfileService::new(SqliteProfileRepository::new(db_pool.clone()));

        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteProfileRepository::new(db_pool.clone()),
            dispatcher,
            config.chat.history_window,
        );

        Ok(Self {
            account_service: Arc::new(account_service),
            profile_service: Arc::new(profile_service),
            chat_service: Arc::new(chat_service),
            db_pool,
        })
    }
}

/// Register every provider whose credential is present in the environment.
///
/// A missing credential only logs a warning: dispatch to an unregistered
/// provider degrades to fallback text instead of failing requests.
fn build_dispatcher(config: &AppConfig) -> ProviderDispatcher {
    let mut dispatcher = ProviderDispatcher::new(config.chat.default_provider);

    match std::env::var("GIGACHAT_AUTH_CREDENTIALS") {
        Ok(credential) if !credential.is_empty() => {
            dispatcher.register(BoxLlmProvider::new(GigaChatProvider::new(
                config.gigachat.clone(),
                SecretString::from(credential),
            )));
        }
        _ => {
            tracing::warn!(provider = %ProviderId::GigaChat, "credential not set, provider disabled");
        }
    }

    match std::env::var("YANDEX_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => {
            dispatcher.register(BoxLlmProvider::new(YandexGptProvider::new(
                config.yandexgpt.clone(),
                SecretString::from(api_key),
            )));
        }
        _ => {
            tracing::warn!(provider = %ProviderId::YandexGpt, "credential not set, provider disabled");
        }
    }

    dispatcher
}

/// Resolve the data directory from `BIZCHAT_DATA_DIR`, falling back to
/// `~/.bizchat`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BIZCHAT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bizchat")
}
