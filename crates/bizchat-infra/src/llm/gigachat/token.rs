//! Cached GigaChat OAuth access tokens.
//!
//! GigaChat completion calls authenticate with a short-lived bearer token
//! obtained from an OAuth exchange. The cache holds one token behind a
//! `tokio::sync::Mutex`, so at most one refresh is in flight; a refresh
//! margin renews the token slightly before it expires.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use bizchat_types::llm::LlmError;

use super::types::OauthResponse;

/// Renew this long before the reported expiry.
const REFRESH_MARGIN: chrono::Duration = chrono::Duration::seconds(60);

/// TTL assumed when the exchange response carries no expiry.
const DEFAULT_TTL: chrono::Duration = chrono::Duration::minutes(25);

/// Token exchange timeout.
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-exchange correlation id. Random v4, so the header carries no
/// timestamp.
fn rquid() -> String {
    Uuid::new_v4().to_string()
}

struct CachedToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

/// Expiry-aware cache around the GigaChat OAuth exchange.
pub struct TokenCache {
    client: reqwest::Client,
    oauth_url: String,
    credential: SecretString,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Create a cache for the given OAuth endpoint and Basic credential.
    pub fn new(oauth_url: String, credential: SecretString, scope: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            oauth_url,
            credential,
            scope,
            cached: Mutex::new(None),
        }
    }

    /// Get a valid access token, refreshing through the OAuth exchange
    /// when the cache is empty or inside the refresh margin.
    pub async fn token(&self) -> Result<SecretString, LlmError> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached.as_ref() {
            if Utc::now() + REFRESH_MARGIN < entry.expires_at {
                return Ok(entry.token.clone());
            }
        }

        let fresh = self.exchange().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token so the next call performs a fresh exchange.
    /// Used after the completion endpoint rejects a token with 401.
    pub async fn invalidate(&self) {
        let mut cached = self.cached.lock().await;
        *cached = None;
    }

    async fn exchange(&self) -> Result<CachedToken, LlmError> {
        if self.credential.expose_secret().is_empty() {
            return Err(LlmError::NotConfigured(
                "gigachat credential is empty".to_string(),
            ));
        }

        let response = self
            .client
            .post(&self.oauth_url)
            .header(
                "Authorization",
                format!("Basic {}", self.credential.expose_secret()),
            )
            .header("RqUID", rquid())
            .form(&[("scope", self.scope.as_str())])
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

        let body: OauthResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let expires_at = body
            .expires_at
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or_else(|| Utc::now() + DEFAULT_TTL);

        debug!(%expires_at, "gigachat access token refreshed");
        Ok(CachedToken {
            token: SecretString::from(body.access_token),
            expires_at,
        })
    }
}
