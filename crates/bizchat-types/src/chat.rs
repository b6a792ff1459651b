//! Chat session and message types for Bizchat.
//!
//! A session is a conversation thread owned by one user; its ordered
//! message transcript is the sole unit of conversational state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from the llm module (used in both contexts).
pub use crate::llm::MessageRole;

/// A chat session between a user and the assistant.
///
/// Sessions are append-only: after creation nothing on the row changes,
/// only messages accumulate underneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Construct a fresh session owned by `user_id`.
    ///
    /// The UUIDv7 id is assigned here, before any persistence, so the
    /// first message can reference it inside the same transaction.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// A single message within a chat session.
///
/// Messages are immutable once created and ordered by `created_at`
/// (UUIDv7 `id` as tiebreaker) within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Construct a message for `session_id` with the given role.
    pub fn new(session_id: Uuid, role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// The full transcript of a session, as returned to transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistory {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}
