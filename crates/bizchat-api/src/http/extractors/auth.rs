//! Bearer token authentication extractor.
//!
//! Resolves `Authorization: Bearer <token>` to the owning user. The
//! presented token is hashed and compared against unexpired rows in the
//! `access_tokens` table; extracting `CurrentUser` performs the check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bizchat_types::error::AccountError;
use bizchat_types::identity::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated user behind the request's bearer token.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)?;

        let user = state
            .account_service
            .authenticate(&token)
            .await
            .map_err(|e| match e {
                AccountError::InvalidCredentials => {
                    AppError::Unauthorized("Invalid or expired access token".to_string())
                }
                other => other.into(),
            })?;

        Ok(CurrentUser(user))
    }
}

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(parts: &Parts) -> Result<String, AppError> {
    let Some(auth) = parts.headers.get("authorization") else {
        return Err(AppError::Unauthorized(
            "Missing access token. Provide via 'Authorization: Bearer <token>' header.".to_string(),
        ));
    };

    let auth_str = auth
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header encoding".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization header must use the Bearer scheme".to_string())
        })
}
