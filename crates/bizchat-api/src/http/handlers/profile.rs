//! Business profile HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/profile               - Current user's profile
//! - POST /api/v1/profile               - Create or replace the profile
//! - POST /api/v1/profile/link_telegram - Link a Telegram account

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use bizchat_core::service::profile::ProfileInput;
use bizchat_types::identity::BusinessProfile;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub industry: String,
    pub company_size: String,
    pub goals: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkTelegramBody {
    pub telegram_id: String,
}

/// GET /api/v1/profile - Current user's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<BusinessProfile>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let profile = state.profile_service.get(&user.id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(profile, request_id, elapsed)))
}

/// POST /api/v1/profile - Create or replace the profile.
///
/// Returns 201 when the profile did not exist, 200 on update.
pub async fn upsert_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ProfileBody>,
) -> Result<(StatusCode, Json<ApiResponse<BusinessProfile>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let input = ProfileInput {
        industry: body.industry,
        company_size: body.company_size,
        goals: body.goals,
    };
    let (profile, created) = state.profile_service.upsert(&user.id, input).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let elapsed = start.elapsed().as_millis() as u64;
    Ok((
        status,
        Json(ApiResponse::success(profile, request_id, elapsed)),
    ))
}

/// POST /api/v1/profile/link_telegram - Link a Telegram account.
pub async fn link_telegram(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<LinkTelegramBody>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state
        .account_service
        .link_telegram(&user.id, &body.telegram_id)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "telegram_id": body.telegram_id }),
        request_id,
        elapsed,
    )))
}
