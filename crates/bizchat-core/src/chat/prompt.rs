//! Prompt assembly: persona, business context, and windowed history.
//!
//! The system prompt is a fixed persona, optionally extended with the
//! user's business profile. History travels as structured role/content
//! turns end-to-end; `flatten_turns` exists only for the one provider
//! whose wire shape needs a single free-text turn, and that text is never
//! re-parsed back into roles.

use bizchat_types::chat::ChatMessage;
use bizchat_types::identity::BusinessProfile;
use bizchat_types::llm::{ChatTurn, CompletionRequest};

/// Fixed base persona for every conversation.
pub const BASE_PERSONA: &str =
    "You are a helpful assistant for small businesses. Answer briefly and to the point.";

/// Build the system prompt from the persona and an optional business
/// profile.
pub fn build_system_prompt(profile: Option<&BusinessProfile>) -> String {
    let mut system = String::from(BASE_PERSONA);
    if let Some(profile) = profile {
        system.push_str(&format!(
            " Context about the user's business: industry - {}, company size - {}, goals - {}.",
            profile.industry, profile.company_size, profile.goals
        ));
    }
    system
}

/// Convert stored messages into provider-facing turns, oldest first.
pub fn to_turns(history: &[ChatMessage]) -> Vec<ChatTurn> {
    history
        .iter()
        .map(|m| ChatTurn {
            role: m.role,
            content: m.content.clone(),
        })
        .collect()
}

/// Assemble a completion request from profile, windowed history, and the
/// new user message.
///
/// The new message is not part of `history`; providers append it last, so
/// it is never double-counted.
pub fn build_request(
    profile: Option<&BusinessProfile>,
    history: &[ChatMessage],
    user_message: &str,
) -> CompletionRequest {
    CompletionRequest {
        system: build_system_prompt(profile),
        history: to_turns(history),
        user_message: user_message.to_string(),
    }
}

/// Flatten turns into `"role: content"` lines, oldest first.
///
/// Only used by providers that require a single free-text turn. Content
/// containing `": "` stays intact because the flattened text is never
/// split back into roles.
pub fn flatten_turns(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}
