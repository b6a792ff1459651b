//! User account and business profile types for Bizchat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account.
///
/// `password_hash` is an Argon2id PHC string; the plaintext password never
/// appears outside the registration/login call stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Telegram account linked to this user, when the relay is in use.
    pub telegram_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The business context a user describes once and the prompt builder
/// injects into every conversation.
///
/// One profile per user; updates are last-write-wins with no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub industry: String,
    pub company_size: String,
    pub goals: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An issued opaque access token, returned to the client once at login.
///
/// Only the SHA-256 hash of `access_token` is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Persisted form of an access token: the hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct AccessTokenRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialize_hides_password_hash() {
        let user = User {
            id: Uuid::now_v7(),
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            telegram_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("owner@example.com"));
    }
}
