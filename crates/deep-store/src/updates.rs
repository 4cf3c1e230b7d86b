//! Partial session updates.
//!
//! Only `Some` fields are merged into the stored session. The serialized form
//! lists the changed fields only, which is what the store logs.

use deep_core::entities::{ChatMessage, ChatSession};
use deep_core::enums::SessionStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<Option<String>>,
}

impl SessionUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge the set fields into `session`, leaving the rest untouched.
    pub fn apply(&self, session: &mut ChatSession) {
        if let Some(title) = &self.title {
            session.title.clone_from(title);
        }
        if let Some(task_id) = &self.task_id {
            session.task_id.clone_from(task_id);
        }
        if let Some(query) = &self.query {
            session.query.clone_from(query);
        }
        if let Some(messages) = &self.messages {
            session.messages.clone_from(messages);
        }
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(result_url) = &self.result_url {
            session.result_url.clone_from(result_url);
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionUpdateBuilder(SessionUpdate);

impl SessionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SessionUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn task_id(mut self, task_id: impl Into<String>) -> Self {
        self.0.task_id = Some(task_id.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.0.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.0.messages = Some(messages);
        self
    }

    #[must_use]
    pub fn status(mut self, status: SessionStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn result_url(mut self, result_url: Option<String>) -> Self {
        self.0.result_url = Some(result_url);
        self
    }

    #[must_use]
    pub fn build(self) -> SessionUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn session() -> ChatSession {
        ChatSession {
            id: "s1".into(),
            title: "Title".into(),
            task_id: "abc123".into(),
            query: "Title".into(),
            messages: vec![ChatMessage::user("Title")],
            status: SessionStatus::Running,
            result_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn serializes_changed_fields_only() {
        let update = SessionUpdateBuilder::new()
            .status(SessionStatus::Completed)
            .build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "status": "completed" })
        );
    }

    #[test]
    fn clearing_result_url_is_distinct_from_leaving_it() {
        let mut s = session();
        s.result_url = Some("https://blob.example/r.md".into());

        SessionUpdate::default().apply(&mut s);
        assert!(s.result_url.is_some());

        SessionUpdateBuilder::new().result_url(None).build().apply(&mut s);
        assert_eq!(s.result_url, None);
    }

    #[test]
    fn status_only_update_keeps_other_fields() {
        let before = session();
        let mut after = before.clone();
        SessionUpdateBuilder::new()
            .status(SessionStatus::Failed)
            .build()
            .apply(&mut after);

        assert_eq!(after.status, SessionStatus::Failed);
        assert_eq!(after.messages, before.messages);
        assert_eq!(after.title, before.title);
        assert_eq!(after.task_id, before.task_id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(SessionUpdateBuilder::new().build().is_empty());
        assert!(!SessionUpdateBuilder::new().title("t").build().is_empty());
    }
}
