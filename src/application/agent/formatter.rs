//! Boundary between the external request shape and the loop's conversation
//! state. History is taken exactly as supplied, no reordering and no
//! deduplication; anything malformed is rejected here, before the loop runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::types::{ChatMessage, Conversation, MessageRole};

/// One prior turn as the caller supplies it. Roles follow the external
/// contract (`human`/`ai`); the plain `user`/`assistant` spellings are
/// accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum InvalidHistoryError {
    #[error("history entry {index} has unsupported role '{role}'")]
    UnsupportedRole { index: usize, role: String },
    #[error("question cannot be empty")]
    EmptyQuestion,
}

pub fn to_conversation(
    history: &[HistoryMessage],
    question: &str,
) -> Result<Conversation, InvalidHistoryError> {
    if question.trim().is_empty() {
        return Err(InvalidHistoryError::EmptyQuestion);
    }

    let mut conversation = Conversation::new();
    for (index, entry) in history.iter().enumerate() {
        let role = match entry.role.as_str() {
            "human" | "user" => MessageRole::User,
            "ai" | "assistant" => MessageRole::Assistant,
            other => {
                return Err(InvalidHistoryError::UnsupportedRole {
                    index,
                    role: other.to_string(),
                });
            }
        };
        conversation.push(ChatMessage::new(role, entry.content.clone()));
    }
    conversation.push(ChatMessage::user(question));
    Ok(conversation)
}

/// Wrap the loop's final answer as the single assistant message the
/// external response carries.
pub fn to_response(answer: impl Into<String>) -> ChatMessage {
    ChatMessage::assistant(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(role: &str, content: &str) -> HistoryMessage {
        HistoryMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn history_order_is_preserved_and_question_appended_last() {
        let history = vec![
            entry("human", "hi"),
            entry("ai", "hello!"),
            entry("human", "what can you do?"),
        ];

        let conversation = to_conversation(&history, "what's the weather?").unwrap();

        let turns = conversation.turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].content, "hi");
        assert_eq!(turns[0].role, MessageRole::User);
        assert_eq!(turns[1].role, MessageRole::Assistant);
        assert_eq!(turns[2].content, "what can you do?");
        assert_eq!(turns[3].role, MessageRole::User);
        assert_eq!(turns[3].content, "what's the weather?");
    }

    #[test]
    fn unsupported_role_fails_fast() {
        let history = vec![entry("human", "hi"), entry("system", "sneaky")];

        let err = to_conversation(&history, "question").unwrap_err();

        assert!(
            matches!(err, InvalidHistoryError::UnsupportedRole { index: 1, ref role } if role == "system")
        );
    }

    #[test]
    fn empty_question_is_rejected() {
        let err = to_conversation(&[], "   ").unwrap_err();
        assert!(matches!(err, InvalidHistoryError::EmptyQuestion));
    }

    #[test]
    fn response_is_a_single_assistant_message() {
        let message = to_response("done");
        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.content, "done");
    }
}
