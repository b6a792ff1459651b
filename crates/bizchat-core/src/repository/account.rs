//! AccountRepository trait definition.
//!
//! Persistence contract for user accounts and access tokens.
//! Implementations live in bizchat-infra (e.g., `SqliteAccountRepository`).

use bizchat_types::error::RepositoryError;
use bizchat_types::identity::{AccessTokenRecord, User};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository trait for user and token persistence.
pub trait AccountRepository: Send + Sync {
    /// Insert a new user. Fails with `Conflict` when the email is taken.
    fn create_user(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a user by ID.
    fn get_user(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Find a user by email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Find a user by linked Telegram account.
    fn find_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Link a Telegram account to a user.
    fn set_telegram_id(
        &self,
        user_id: &Uuid,
        telegram_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Store an issued access token (hash only).
    fn store_token(
        &self,
        token: &AccessTokenRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Resolve a token hash to its user, ignoring expired tokens.
    fn find_user_by_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
