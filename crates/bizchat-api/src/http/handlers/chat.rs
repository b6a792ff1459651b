//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chat/send_message - Run one chat turn
//! - GET  /api/v1/chat/session/{id} - Full session transcript

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bizchat_types::chat::{ChatMessage, SessionHistory};
use bizchat_types::llm::ProviderId;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub message_content: String,
    /// Omitted on the first turn; the response carries the new session id.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// Explicit provider choice; the configured default when omitted.
    #[serde(default)]
    pub provider: Option<ProviderId>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageData {
    pub session_id: Uuid,
    pub assistant_message: ChatMessage,
}

/// POST /api/v1/chat/send_message - Run one chat turn.
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<ApiResponse<SendMessageData>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let outcome = state
        .chat_service
        .send_message(
            &user.id,
            body.session_id,
            body.provider,
            &body.message_content,
        )
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        SendMessageData {
            session_id: outcome.session_id,
            assistant_message: outcome.assistant_message,
        },
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/chat/session/{id} - Full session transcript.
pub async fn get_session_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionHistory>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = session_id
        .parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid session id: {session_id}")))?;

    let history = state.chat_service.get_history(&user.id, &sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(history, request_id, elapsed)))
}
