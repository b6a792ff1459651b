use thiserror::Error;

/// Errors from repository operations (used by trait definitions in bizchat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from chat orchestration.
///
/// Ownership and not-found failures abort before any write; provider
/// failures never surface here (they degrade to fallback text inside the
/// dispatcher).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,

    #[error("access to this session is denied")]
    AccessDenied,

    #[error("message content must not be empty")]
    EmptyMessage,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors from account operations (registration, login, linking).
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("a user with this email already exists")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound,

    #[error("this telegram account is already linked to another user")]
    TelegramIdTaken,

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors from business profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("business profile not found")]
    NotFound,

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(
            ChatError::AccessDenied.to_string(),
            "access to this session is denied"
        );
    }

    #[test]
    fn test_repository_error_converts_into_chat_error() {
        let err: ChatError = RepositoryError::Query("syntax error".to_string()).into();
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_account_error_display() {
        let err = AccountError::Validation {
            field: "email",
            reason: "must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "invalid email: must not be empty");
    }
}
