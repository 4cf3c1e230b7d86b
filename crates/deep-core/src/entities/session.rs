use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ChatRole, SessionStatus};

/// Maximum length of a session title, in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// One message in a local chat session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A local record pairing one research query with its remote task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub task_id: String,
    pub query: String,
    pub messages: Vec<ChatMessage>,
    pub status: SessionStatus,
    pub result_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Derive a session title from the query that started it.
    ///
    /// Truncates on character boundaries, never inside a UTF-8 sequence.
    #[must_use]
    pub fn title_for(query: &str) -> String {
        query.chars().take(TITLE_MAX_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_query_is_its_own_title() {
        assert_eq!(
            ChatSession::title_for("What is quantum computing?"),
            "What is quantum computing?"
        );
    }

    #[test]
    fn long_query_is_cut_at_fifty_chars() {
        let query = "a".repeat(80);
        assert_eq!(ChatSession::title_for(&query).len(), TITLE_MAX_CHARS);
    }

    #[test]
    fn multibyte_query_is_cut_on_char_boundary() {
        let query = "é".repeat(60);
        let title = ChatSession::title_for(&query);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(title.len(), TITLE_MAX_CHARS * 2);
    }

    #[test]
    fn message_constructors_set_role() {
        assert_eq!(ChatMessage::user("q").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("a").role, ChatRole::Assistant);
    }
}
