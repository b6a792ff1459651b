//! Account service: registration, login, token authentication, and
//! Telegram linking.
//!
//! Generic over `AccountRepository`, `PasswordHasher`, and `TokenMinter`
//! so the service can be exercised with in-memory fakes.

use bizchat_types::error::AccountError;
use bizchat_types::identity::{AccessTokenRecord, IssuedToken, User};
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::repository::account::AccountRepository;
use crate::service::password::PasswordHasher;
use crate::service::token::TokenMinter;

/// Orchestrates user account lifecycle and authentication.
pub struct AccountService<R: AccountRepository, H: PasswordHasher, M: TokenMinter> {
    repo: R,
    hasher: H,
    minter: M,
    token_ttl: Duration,
}

impl<R: AccountRepository, H: PasswordHasher, M: TokenMinter> AccountService<R, H, M> {
    /// Create a new account service; `token_ttl_secs` bounds the lifetime
    /// of issued access tokens.
    pub fn new(repo: R, hasher: H, minter: M, token_ttl_secs: u64) -> Self {
        Self {
            repo,
            hasher,
            minter,
            token_ttl: Duration::seconds(token_ttl_secs as i64),
        }
    }

    /// Register a new user.
    ///
    /// Rejects empty credentials and duplicate emails before any write.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AccountError::Validation {
                field: "email",
                reason: "must be a valid email address".to_string(),
            });
        }
        if password.is_empty() {
            return Err(AccountError::Validation {
                field: "password",
                reason: "must not be empty".to_string(),
            });
        }

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash_password(password)
            .map_err(AccountError::Hashing)?;

        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            telegram_id: None,
            created_at: Utc::now(),
        };
        self.repo.create_user(&user).await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password collapse into the same error so
    /// login failures do not reveal which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AccountError> {
        let email = email.trim().to_lowercase();
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.hasher.verify_password(password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        let minted = self.minter.mint();
        let expires_at = Utc::now() + self.token_ttl;
        let record = AccessTokenRecord {
            id: Uuid::now_v7(),
            user_id: user.id,
            token_hash: minted.hash,
            created_at: Utc::now(),
            expires_at,
        };
        self.repo.store_token(&record).await?;

        info!(user_id = %user.id, "access token issued");
        Ok(IssuedToken {
            access_token: minted.plaintext,
            expires_at,
        })
    }

    /// Resolve a presented bearer token to its user.
    ///
    /// Expired and unknown tokens both fail with `InvalidCredentials`.
    pub async fn authenticate(&self, token: &str) -> Result<User, AccountError> {
        let hash = self.minter.hash(token);
        self.repo
            .find_user_by_token_hash(&hash, Utc::now())
            .await?
            .ok_or(AccountError::InvalidCredentials)
    }

    /// Get the current user record.
    pub async fn me(&self, user_id: &Uuid) -> Result<User, AccountError> {
        self.repo
            .get_user(user_id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// Find the user a Telegram account is linked to, if any.
    pub async fn find_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> Result<Option<User>, AccountError> {
        Ok(self.repo.find_by_telegram_id(telegram_id).await?)
    }

    /// Link a Telegram account to this user.
    ///
    /// Fails with `TelegramIdTaken` when another user already holds the
    /// account; re-linking the same user is a no-op success.
    pub async fn link_telegram(
        &self,
        user_id: &Uuid,
        telegram_id: &str,
    ) -> Result<(), AccountError> {
        let telegram_id = telegram_id.trim();
        if telegram_id.is_empty() {
            return Err(AccountError::Validation {
                field: "telegram_id",
                reason: "must not be empty".to_string(),
            });
        }

        if self.repo.get_user(user_id).await?.is_none() {
            return Err(AccountError::NotFound);
        }

        if let Some(holder) = self.repo.find_by_telegram_id(telegram_id).await? {
            if holder.id != *user_id {
                return Err(AccountError::TelegramIdTaken);
            }
            return Ok(());
        }

        self.repo.set_telegram_id(user_id, telegram_id).await?;
        info!(user_id = %user_id, "telegram account linked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizchat_types::error::RepositoryError;
    use chrono::DateTime;
    use std::sync::Mutex;

    use crate::service::token::MintedToken;

    #[derive(Default)]
    struct MemoryAccounts {
        users: Mutex<Vec<User>>,
        tokens: Mutex<Vec<AccessTokenRecord>>,
    }

    impl AccountRepository for MemoryAccounts {
        async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(RepositoryError::Conflict("email".to_string()));
            }
            users.push(user.clone());
            Ok(())
        }

        async fn get_user(&self, user_id: &Uuid) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == *user_id)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_telegram_id(
            &self,
            telegram_id: &str,
        ) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.telegram_id.as_deref() == Some(telegram_id))
                .cloned())
        }

        async fn set_telegram_id(
            &self,
            user_id: &Uuid,
            telegram_id: &str,
        ) -> Result<(), RepositoryError> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == *user_id)
                .ok_or(RepositoryError::NotFound)?;
            user.telegram_id = Some(telegram_id.to_string());
            Ok(())
        }

        async fn store_token(&self, token: &AccessTokenRecord) -> Result<(), RepositoryError> {
            self.tokens.lock().unwrap().push(token.clone());
            Ok(())
        }

        async fn find_user_by_token_hash(
            &self,
            token_hash: &str,
            now: DateTime<Utc>,
        ) -> Result<Option<User>, RepositoryError> {
            let user_id = {
                let tokens = self.tokens.lock().unwrap();
                let Some(record) = tokens
                    .iter()
                    .find(|t| t.token_hash == token_hash && t.expires_at > now)
                else {
                    return Ok(None);
                };
                record.user_id
            };
            self.get_user(&user_id).await
        }
    }

    /// Reversible "hash" keeps test assertions readable.
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash_password(&self, password: &str) -> Result<String, String> {
            Ok(format!("hashed:{password}"))
        }

        fn verify_password(&self, password: &str, hash: &str) -> bool {
            hash == format!("hashed:{password}")
        }
    }

    struct FakeMinter;

    impl TokenMinter for FakeMinter {
        fn mint(&self) -> MintedToken {
            let plaintext = format!("tok-{}", Uuid::now_v7());
            let hash = format!("h:{plaintext}");
            MintedToken { plaintext, hash }
        }

        fn hash(&self, token: &str) -> String {
            format!("h:{token}")
        }
    }

    fn service() -> AccountService<MemoryAccounts, FakeHasher, FakeMinter> {
        AccountService::new(MemoryAccounts::default(), FakeHasher, FakeMinter, 3600)
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let svc = service();
        let user = svc.register("Owner@Example.com", "secret").await.unwrap();
        assert_eq!(user.email, "owner@example.com");

        let token = svc.login("owner@example.com", "secret").await.unwrap();
        assert!(!token.access_token.is_empty());

        let authed = svc.authenticate(&token.access_token).await.unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let svc = service();
        svc.register("a@b.c", "pw").await.unwrap();
        let err = svc.register("a@b.c", "pw2").await.unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let svc = service();
        assert!(matches!(
            svc.register("not-an-email", "pw").await.unwrap_err(),
            AccountError::Validation { field: "email", .. }
        ));
        assert!(matches!(
            svc.register("a@b.c", "").await.unwrap_err(),
            AccountError::Validation {
                field: "password",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let svc = service();
        svc.register("a@b.c", "right").await.unwrap();
        let err = svc.login("a@b.c", "wrong").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let svc = service();
        let err = svc.login("ghost@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let svc = service();
        let err = svc.authenticate("tok-unknown").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_link_telegram_conflict() {
        let svc = service();
        let a = svc.register("a@b.c", "pw").await.unwrap();
        let b = svc.register("b@b.c", "pw").await.unwrap();

        svc.link_telegram(&a.id, "tg-123").await.unwrap();
        // Same user re-linking is fine.
        svc.link_telegram(&a.id, "tg-123").await.unwrap();

        let err = svc.link_telegram(&b.id, "tg-123").await.unwrap_err();
        assert!(matches!(err, AccountError::TelegramIdTaken));

        let found = svc.find_by_telegram_id("tg-123").await.unwrap().unwrap();
        assert_eq!(found.id, a.id);
    }
}
