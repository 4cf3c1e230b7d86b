//! Persisted chat session history.

use std::sync::Arc;

use chrono::Utc;
use deep_core::entities::{ChatMessage, ChatSession};
use deep_core::enums::SessionStatus;

use crate::observable::{ListenerId, Observable};
use crate::storage::Storage;
use crate::updates::SessionUpdate;

/// Storage key holding the serialized session list.
pub const SESSIONS_KEY: &str = "chat_sessions";

/// Most-recent-first list of chat sessions, written back to storage in full
/// after every change.
///
/// Clones share the same list.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Observable<Vec<ChatSession>>,
}

impl SessionStore {
    /// Read the session list from `storage` once and keep it in sync.
    ///
    /// Missing, unreadable or corrupt data yields an empty list, which is then
    /// written back.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let initial = read_sessions(storage.as_ref());
        tracing::debug!(count = initial.len(), "session store loaded");

        let sessions = Observable::new(initial);
        sessions.subscribe(move |current: &Vec<ChatSession>| persist(storage.as_ref(), current));
        Self { sessions }
    }

    /// Snapshot of every session, most recent first.
    #[must_use]
    pub fn sessions(&self) -> Arc<Vec<ChatSession>> {
        self.sessions.get()
    }

    #[must_use]
    pub fn get_session(&self, id: &str) -> Option<ChatSession> {
        self.sessions.get().iter().find(|s| s.id == id).cloned()
    }

    /// Most recent session tracking `task_id`.
    #[must_use]
    pub fn find_by_task(&self, task_id: &str) -> Option<ChatSession> {
        self.sessions
            .get()
            .iter()
            .find(|s| s.task_id == task_id)
            .cloned()
    }

    /// Record a new running session for `query` and put it first.
    pub fn create_session(&self, query: &str, task_id: &str) -> ChatSession {
        let session = ChatSession {
            id: uuid::Uuid::new_v4().to_string(),
            title: ChatSession::title_for(query),
            task_id: task_id.to_string(),
            query: query.to_string(),
            messages: vec![ChatMessage::user(query)],
            status: SessionStatus::Running,
            result_url: None,
            created_at: Utc::now(),
        };

        self.sessions.update(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(session.clone());
            next.extend(current.iter().cloned());
            next
        });
        tracing::debug!(session_id = %session.id, %task_id, "session created");
        session
    }

    /// Merge `update` into session `id`. Returns `false` if there is no such
    /// session, in which case nothing is written.
    pub fn update_session(&self, id: &str, update: &SessionUpdate) -> bool {
        let updated = self.update_with(id, |session| update.apply(session));
        if updated {
            tracing::debug!(
                session_id = %id,
                changes = ?update,
                "session updated"
            );
        }
        updated
    }

    /// Append one message to session `id`.
    pub fn append_message(&self, id: &str, message: ChatMessage) -> bool {
        self.update_with(id, move |session| session.messages.push(message))
    }

    /// Remove session `id`. Returns `false` if it did not exist.
    pub fn delete_session(&self, id: &str) -> bool {
        let deleted = self.sessions.try_update(|current| {
            let index = current.iter().position(|s| s.id == id)?;
            let mut next = current.clone();
            next.remove(index);
            Some(next)
        });
        if deleted {
            tracing::debug!(session_id = %id, "session deleted");
        }
        deleted
    }

    /// Observe the session list. The listener runs right away and after every
    /// change, and must not modify this store.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Vec<ChatSession>) + Send + Sync + 'static,
    {
        self.sessions.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.sessions.unsubscribe(id)
    }

    /// Edit session `id` in place as one change: listeners and storage see
    /// only the session after `f`. Returns `false` if there is no such
    /// session, in which case `f` is not called.
    pub fn update_with<F>(&self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut ChatSession),
    {
        self.sessions.try_update(|current| {
            let index = current.iter().position(|s| s.id == id)?;
            let mut next = current.clone();
            f(&mut next[index]);
            Some(next)
        })
    }
}

fn read_sessions(storage: &dyn Storage) -> Vec<ChatSession> {
    let raw = match storage.get(SESSIONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(%error, "failed to read stored sessions, starting empty");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|error| {
        tracing::warn!(%error, "stored sessions are corrupt, starting empty");
        Vec::new()
    })
}

fn persist(storage: &dyn Storage, sessions: &[ChatSession]) {
    let result = serde_json::to_string(sessions)
        .map_err(crate::StoreError::from)
        .and_then(|json| storage.set(SESSIONS_KEY, &json));
    if let Err(error) = result {
        tracing::warn!(%error, "failed to persist sessions");
    }
}
