//! History windowing: the bounded read-time view of a transcript used as
//! prompt context.
//!
//! The repository returns the most recent `limit` messages newest-first;
//! the windower reverses them into chronological order. Stored history is
//! never truncated; the window is purely a read-time view.

use bizchat_types::chat::ChatMessage;
use bizchat_types::error::RepositoryError;
use uuid::Uuid;

use super::repository::ChatRepository;

/// Read the most recent `limit` messages of a session in chronological
/// order.
///
/// The result is always a suffix of the full transcript.
pub async fn window<C: ChatRepository>(
    repo: &C,
    session_id: &Uuid,
    limit: u32,
) -> Result<Vec<ChatMessage>, RepositoryError> {
    let mut messages = repo.recent_messages(session_id, limit).await?;
    messages.reverse();
    Ok(messages)
}
