//! Chat orchestration: one entry point per transport-visible operation.
//!
//! `send_message` runs the whole turn: resolve or create the session,
//! window history, assemble the prompt, dispatch to a provider, and
//! commit both messages atomically. Ownership checks run before any
//! write, so a denied or missing session leaves storage untouched.

use std::sync::Arc;

use bizchat_types::chat::{ChatMessage, ChatSession, MessageRole, SessionHistory};
use bizchat_types::error::ChatError;
use bizchat_types::llm::ProviderId;
use tracing::{debug, info};
use uuid::Uuid;

use super::prompt::build_request;
use super::repository::ChatRepository;
use super::window::window;
use crate::llm::ProviderDispatcher;
use crate::repository::profile::ProfileRepository;

/// Result of one completed chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageOutcome {
    /// Session the turn belongs to; newly minted when the caller sent no
    /// session id.
    pub session_id: Uuid,
    pub assistant_message: ChatMessage,
}

/// Orchestrates chat turns and history reads.
pub struct ChatService<C: ChatRepository, P: ProfileRepository> {
    chat_repo: C,
    profile_repo: P,
    dispatcher: Arc<ProviderDispatcher>,
    history_window: u32,
}

impl<C: ChatRepository, P: ProfileRepository> ChatService<C, P> {
    pub fn new(
        chat_repo: C,
        profile_repo: P,
        dispatcher: Arc<ProviderDispatcher>,
        history_window: u32,
    ) -> Self {
        Self {
            chat_repo,
            profile_repo,
            dispatcher,
            history_window,
        }
    }

    /// The dispatcher this service routes completions through.
    pub fn dispatcher(&self) -> &ProviderDispatcher {
        &self.dispatcher
    }

    /// Run one chat turn for `user_id`.
    ///
    /// With `session_id = None` a new session is created and committed
    /// together with the first turn. The windowed history is read before
    /// the new message is written, so the message never counts against
    /// its own context window. Provider failures degrade to fallback text
    /// inside the dispatcher; the turn still commits.
    pub async fn send_message(
        &self,
        user_id: &Uuid,
        session_id: Option<Uuid>,
        provider: Option<ProviderId>,
        content: &str,
    ) -> Result<SendMessageOutcome, ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let (session_id, new_session, history) = match session_id {
            Some(id) => {
                let session = self
                    .chat_repo
                    .get_session(&id)
                    .await?
                    .ok_or(ChatError::SessionNotFound)?;
                if session.user_id != *user_id {
                    return Err(ChatError::AccessDenied);
                }
                let history = window(&self.chat_repo, &id, self.history_window).await?;
                (id, None, history)
            }
            None => {
                let session = ChatSession::new(*user_id);
                (session.id, Some(session), Vec::new())
            }
        };

        let profile = self.profile_repo.get_by_user(user_id).await?;
        let request = build_request(profile.as_ref(), &history, content);
        debug!(
            %session_id,
            history_len = history.len(),
            has_profile = profile.is_some(),
            "prompt assembled"
        );

        // The user message is stamped before dispatch so its timestamp
        // precedes the assistant's.
        let user_message = ChatMessage::new(session_id, MessageRole::User, content.to_string());
        let reply = self.dispatcher.dispatch(provider, &request).await;
        let assistant_message = ChatMessage::new(session_id, MessageRole::Assistant, reply);

        self.chat_repo
            .commit_turn(new_session.as_ref(), &user_message, &assistant_message)
            .await?;

        info!(
            %session_id,
            new_session = new_session.is_some(),
            "chat turn committed"
        );
        Ok(SendMessageOutcome {
            session_id,
            assistant_message,
        })
    }

    /// Get the full transcript of a session the user owns.
    pub async fn get_history(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<SessionHistory, ChatError> {
        let session = self
            .chat_repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        if session.user_id != *user_id {
            return Err(ChatError::AccessDenied);
        }

        let messages = self.chat_repo.get_messages(session_id).await?;
        Ok(SessionHistory {
            session_id: session.id,
            user_id: session.user_id,
            created_at: session.created_at,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::dispatcher::is_fallback_reply;
    use crate::llm::{BoxLlmProvider, LlmProvider};
    use bizchat_types::error::RepositoryError;
    use bizchat_types::identity::BusinessProfile;
    use bizchat_types::llm::{CompletionRequest, CompletionResponse, LlmError};
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryChat {
        sessions: Mutex<Vec<ChatSession>>,
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl ChatRepository for MemoryChat {
        async fn get_session(
            &self,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == *session_id)
                .cloned())
        }

        async fn recent_messages(
            &self,
            session_id: &Uuid,
            limit: u32,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            let messages = self.messages.lock().unwrap();
            Ok(messages
                .iter()
                .filter(|m| m.session_id == *session_id)
                .rev()
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn get_messages(
            &self,
            session_id: &Uuid,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            let messages = self.messages.lock().unwrap();
            Ok(messages
                .iter()
                .filter(|m| m.session_id == *session_id)
                .cloned()
                .collect())
        }

        async fn commit_turn(
            &self,
            new_session: Option<&ChatSession>,
            user_message: &ChatMessage,
            assistant_message: &ChatMessage,
        ) -> Result<(), RepositoryError> {
            if let Some(session) = new_session {
                self.sessions.lock().unwrap().push(session.clone());
            }
            let mut messages = self.messages.lock().unwrap();
            messages.push(user_message.clone());
            messages.push(assistant_message.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryProfiles {
        profiles: Mutex<Vec<BusinessProfile>>,
    }

    impl ProfileRepository for MemoryProfiles {
        async fn get_by_user(
            &self,
            user_id: &Uuid,
        ) -> Result<Option<BusinessProfile>, RepositoryError> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.user_id == *user_id)
                .cloned())
        }

        async fn upsert(&self, profile: &BusinessProfile) -> Result<(), RepositoryError> {
            self.profiles.lock().unwrap().push(profile.clone());
            Ok(())
        }
    }

    /// Echoes the request back so tests can assert on prompt assembly.
    struct EchoProvider {
        fail: bool,
    }

    impl LlmProvider for EchoProvider {
        fn id(&self) -> ProviderId {
            ProviderId::GigaChat
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if self.fail {
                return Err(LlmError::Transport("connection refused".to_string()));
            }
            Ok(CompletionResponse {
                content: format!(
                    "system={};history={};msg={}",
                    request.system,
                    request.history.len(),
                    request.user_message
                ),
                model: None,
            })
        }
    }

    fn service_with(fail: bool) -> ChatService<MemoryChat, MemoryProfiles> {
        let mut dispatcher = ProviderDispatcher::new(ProviderId::GigaChat);
        dispatcher.register(BoxLlmProvider::new(EchoProvider { fail }));
        ChatService::new(
            MemoryChat::default(),
            MemoryProfiles::default(),
            Arc::new(dispatcher),
            10,
        )
    }

    #[tokio::test]
    async fn test_new_session_first_turn() {
        let svc = service_with(false);
        let user_id = Uuid::now_v7();

        let outcome = svc
            .send_message(&user_id, None, None, "hello")
            .await
            .unwrap();

        let history = svc
            .get_history(&user_id, &outcome.session_id)
            .await
            .unwrap();
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[0].role, MessageRole::User);
        assert_eq!(history.messages[0].content, "hello");
        assert_eq!(history.messages[1].role, MessageRole::Assistant);
        // First turn sees no prior history.
        assert!(history.messages[1].content.contains("history=0"));
    }

    #[tokio::test]
    async fn test_second_turn_sees_windowed_history() {
        let svc = service_with(false);
        let user_id = Uuid::now_v7();

        let first = svc
            .send_message(&user_id, None, None, "first")
            .await
            .unwrap();
        let second = svc
            .send_message(&user_id, Some(first.session_id), None, "second")
            .await
            .unwrap();

        assert_eq!(second.session_id, first.session_id);
        // Two messages from the first turn, the new one excluded.
        assert!(second.assistant_message.content.contains("history=2"));
        assert!(second.assistant_message.content.contains("msg=second"));
    }

    #[tokio::test]
    async fn test_profile_reaches_system_prompt() {
        let svc = service_with(false);
        let user_id = Uuid::now_v7();
        svc.profile_repo
            .upsert(&BusinessProfile {
                id: Uuid::now_v7(),
                user_id,
                industry: "bakery".to_string(),
                company_size: "3".to_string(),
                goals: "more regulars".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await
            .unwrap();

        let outcome = svc.send_message(&user_id, None, None, "hi").await.unwrap();
        assert!(outcome
            .assistant_message
            .content
            .contains("industry - bakery"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let svc = service_with(false);
        let err = svc
            .send_message(&Uuid::now_v7(), None, None, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert!(svc.chat_repo.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_session_denied_without_writes() {
        let svc = service_with(false);
        let owner = Uuid::now_v7();
        let intruder = Uuid::now_v7();

        let outcome = svc.send_message(&owner, None, None, "mine").await.unwrap();
        let before = svc.chat_repo.messages.lock().unwrap().len();

        let err = svc
            .send_message(&intruder, Some(outcome.session_id), None, "theirs")
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::AccessDenied));
        assert_eq!(svc.chat_repo.messages.lock().unwrap().len(), before);

        let err = svc
            .get_history(&intruder, &outcome.session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::AccessDenied));
    }

    #[tokio::test]
    async fn test_unknown_session_not_found() {
        let svc = service_with(false);
        let err = svc
            .send_message(&Uuid::now_v7(), Some(Uuid::now_v7()), None, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_provider_failure_persists_fallback_turn() {
        let svc = service_with(true);
        let user_id = Uuid::now_v7();

        let outcome = svc
            .send_message(&user_id, None, None, "hello")
            .await
            .unwrap();

        assert!(is_fallback_reply(&outcome.assistant_message.content));
        // The degraded turn is still durably recorded.
        let history = svc
            .get_history(&user_id, &outcome.session_id)
            .await
            .unwrap();
        assert_eq!(history.messages.len(), 2);
        assert!(is_fallback_reply(&history.messages[1].content));
    }

    #[tokio::test]
    async fn test_history_is_chronological() {
        let svc = service_with(false);
        let user_id = Uuid::now_v7();

        let first = svc.send_message(&user_id, None, None, "one").await.unwrap();
        svc.send_message(&user_id, Some(first.session_id), None, "two")
            .await
            .unwrap();

        let history = svc.get_history(&user_id, &first.session_id).await.unwrap();
        assert_eq!(history.messages.len(), 4);
        for pair in history.messages.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
        let roles: Vec<_> = history.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant
            ]
        );
    }
}
