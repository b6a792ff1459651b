//! ChatRepository trait definition.
//!
//! Persistence contract for chat sessions and messages. Implementations
//! live in bizchat-infra (e.g., `SqliteChatRepository`). Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use bizchat_types::chat::{ChatMessage, ChatSession};
use bizchat_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
pub trait ChatRepository: Send + Sync {
    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Get the most recent messages of a session, newest first.
    ///
    /// Callers reverse the result to obtain chronological order; see
    /// `chat::window`.
    fn recent_messages(
        &self,
        session_id: &Uuid,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Get the full transcript of a session in chronological order.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Durably record one completed chat turn.
    ///
    /// When `new_session` is set, the session row is inserted in the same
    /// transaction as the two messages. All three writes commit together
    /// or not at all, so a crash mid-turn can never leave a session with
    /// a dangling user message.
    fn commit_turn(
        &self,
        new_session: Option<&ChatSession>,
        user_message: &ChatMessage,
        assistant_message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
