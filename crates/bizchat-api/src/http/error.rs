//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bizchat_types::error::{AccountError, ChatError, ProfileError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat orchestration errors.
    Chat(ChatError),
    /// Account errors.
    Account(AccountError),
    /// Business profile errors.
    Profile(ProfileError),
    /// Authentication failure.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        AppError::Profile(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(ChatError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Chat(ChatError::AccessDenied) => (
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "Access to this session is denied".to_string(),
            ),
            AppError::Chat(e @ ChatError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Chat(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CHAT_ERROR",
                e.to_string(),
            ),
            AppError::Account(e @ AccountError::EmailTaken) => {
                (StatusCode::CONFLICT, "EMAIL_TAKEN", e.to_string())
            }
            AppError::Account(e @ AccountError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                e.to_string(),
            ),
            AppError::Account(AccountError::NotFound) => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            AppError::Account(e @ AccountError::TelegramIdTaken) => {
                (StatusCode::CONFLICT, "TELEGRAM_TAKEN", e.to_string())
            }
            AppError::Account(e @ AccountError::Validation { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Account(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ACCOUNT_ERROR",
                e.to_string(),
            ),
            AppError::Profile(ProfileError::NotFound) => (
                StatusCode::NOT_FOUND,
                "PROFILE_NOT_FOUND",
                "Business profile not found".to_string(),
            ),
            AppError::Profile(e @ ProfileError::Validation { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Profile(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROFILE_ERROR",
                e.to_string(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = json!({
            "data": null,
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
