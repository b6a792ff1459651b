//! Authentication HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/auth/register - Create a new user account
//! - POST /api/v1/auth/login    - Exchange credentials for an access token
//! - GET  /api/v1/auth/me       - Current user record

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use bizchat_types::identity::{IssuedToken, User};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/register - Create a new user account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let user = state
        .account_service
        .register(&body.email, &body.password)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user, request_id, elapsed)),
    ))
}

/// POST /api/v1/auth/login - Exchange credentials for an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<ApiResponse<IssuedToken>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let token = state
        .account_service
        .login(&body.email, &body.password)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(token, request_id, elapsed)))
}

/// GET /api/v1/auth/me - Current user record.
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let user = state.account_service.me(&user.id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(user, request_id, elapsed)))
}
