//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `bizchat-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, and a single
//! transaction for the per-turn commit.

use bizchat_core::chat::repository::ChatRepository;
use bizchat_types::chat::{ChatMessage, ChatSession};
use bizchat_types::error::RepositoryError;
use bizchat_types::llm::MessageRole;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct ChatSessionRow {
    id: String,
    user_id: String,
    created_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatSession {
            id,
            user_id,
            created_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: String,
    session_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            session_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn rows_to_messages(
    rows: Vec<sqlx::sqlite::SqliteRow>,
) -> Result<Vec<ChatMessage>, RepositoryError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in &rows {
        let msg_row =
            ChatMessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        messages.push(msg_row.into_message()?);
    }
    Ok(messages)
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn get_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn recent_messages(
        &self,
        session_id: &Uuid,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // UUIDv7 id breaks ties between messages of the same turn.
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages WHERE session_id = ?
               ORDER BY created_at DESC, id DESC LIMIT ?"#,
        )
        .bind(session_id.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_messages(rows)
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages WHERE session_id = ?
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_messages(rows)
    }

    async fn commit_turn(
        &self,
        new_session: Option<&ChatSession>,
        user_message: &ChatMessage,
        assistant_message: &ChatMessage,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if let Some(session) = new_session {
            sqlx::query("INSERT INTO chat_sessions (id, user_id, created_at) VALUES (?, ?, ?)")
                .bind(session.id.to_string())
                .bind(session.user_id.to_string())
                .bind(format_datetime(&session.created_at))
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        for message in [user_message, assistant_message] {
            sqlx::query(
                r#"INSERT INTO chat_messages (id, session_id, role, content, created_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(message.id.to_string())
            .bind(message.session_id.to_string())
            .bind(message.role.to_string())
            .bind(&message.content)
            .bind(format_datetime(&message.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::account::SqliteAccountRepository;
    use bizchat_core::repository::account::AccountRepository;
    use bizchat_types::identity::User;

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    async fn seed_user(pool: &DatabasePool) -> Uuid {
        let accounts = SqliteAccountRepository::new(pool.clone());
        let user = User {
            id: Uuid::now_v7(),
            email: format!("{}@example.com", Uuid::now_v7()),
            password_hash: "$argon2id$test".to_string(),
            telegram_id: None,
            created_at: Utc::now(),
        };
        accounts.create_user(&user).await.unwrap();
        user.id
    }

    fn turn(session_id: Uuid, user_text: &str, assistant_text: &str) -> (ChatMessage, ChatMessage) {
        (
            ChatMessage::new(session_id, MessageRole::User, user_text.to_string()),
            ChatMessage::new(session_id, MessageRole::Assistant, assistant_text.to_string()),
        )
    }

    #[tokio::test]
    async fn test_commit_turn_creates_session_and_messages() {
        let (_dir, pool) = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = ChatSession::new(user_id);
        let (user_msg, assistant_msg) = turn(session.id, "hello", "hi there");
        repo.commit_turn(Some(&session), &user_msg, &assistant_msg)
            .await
            .unwrap();

        let stored = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, user_id);

        let messages = repo.get_messages(&session.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_commit_turn_existing_session() {
        let (_dir, pool) = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = ChatSession::new(user_id);
        let (u1, a1) = turn(session.id, "one", "reply one");
        repo.commit_turn(Some(&session), &u1, &a1).await.unwrap();

        let (u2, a2) = turn(session.id, "two", "reply two");
        repo.commit_turn(None, &u2, &a2).await.unwrap();

        let messages = repo.get_messages(&session.id).await.unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].content, "two");
    }

    #[tokio::test]
    async fn test_commit_turn_atomic_on_failure() {
        let (_dir, pool) = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = ChatSession::new(user_id);
        let (user_msg, mut assistant_msg) = turn(session.id, "hello", "hi");
        // Duplicate primary key forces the second insert to fail.
        assistant_msg.id = user_msg.id;

        let result = repo
            .commit_turn(Some(&session), &user_msg, &assistant_msg)
            .await;
        assert!(result.is_err());

        // Nothing from the failed turn is visible, including the session.
        assert!(repo.get_session(&session.id).await.unwrap().is_none());
        assert!(repo.get_messages(&session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_messages_newest_first_with_limit() {
        let (_dir, pool) = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = ChatSession::new(user_id);
        let (u1, a1) = turn(session.id, "m0", "m1");
        repo.commit_turn(Some(&session), &u1, &a1).await.unwrap();
        for i in 1..4 {
            let (u, a) = turn(session.id, &format!("m{}", i * 2), &format!("m{}", i * 2 + 1));
            repo.commit_turn(None, &u, &a).await.unwrap();
        }

        let recent = repo.recent_messages(&session.id, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "m7");
        assert_eq!(recent[1].content, "m6");
        assert_eq!(recent[2].content, "m5");
    }

    #[tokio::test]
    async fn test_get_session_missing() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteChatRepository::new(pool);
        assert!(repo.get_session(&Uuid::now_v7()).await.unwrap().is_none());
    }
}
