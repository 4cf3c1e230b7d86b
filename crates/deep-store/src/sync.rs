//! Folding a task's progress into local session state.

use deep_core::entities::{ChatMessage, ChatSession, ProgressEvent, TaskInfo};
use deep_core::enums::{ChatRole, SessionStatus, TaskStatus};

use crate::research::ResearchStore;
use crate::sessions::SessionStore;
use crate::updates::SessionUpdateBuilder;

/// Applies events and polled status for a session's task to the session and
/// progress stores.
#[derive(Debug, Clone)]
pub struct ResearchTracker {
    sessions: SessionStore,
    research: ResearchStore,
}

impl ResearchTracker {
    #[must_use]
    pub const fn new(sessions: SessionStore, research: ResearchStore) -> Self {
        Self { sessions, research }
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[must_use]
    pub const fn research(&self) -> &ResearchStore {
        &self.research
    }

    pub fn begin(&self, session_id: &str, task_id: &str) {
        tracing::debug!(%session_id, %task_id, "tracking task");
        self.research.begin(task_id);
    }

    /// Apply one streamed event. Only terminal events touch the session,
    /// and each one is stored as a single change.
    pub fn on_event(&self, session_id: &str, event: &ProgressEvent) {
        self.research.record_event(event);

        let (update, answer) = if event.is_completed() {
            let mut update = SessionUpdateBuilder::new().status(SessionStatus::Completed);
            if let Some(url) = event.result_url() {
                update = update.result_url(Some(url.to_string()));
            }
            let answer = event.report().unwrap_or(event.message.as_str());
            (update.build(), ChatMessage::assistant(answer))
        } else if event.is_failed() {
            let update = SessionUpdateBuilder::new()
                .status(SessionStatus::Failed)
                .build();
            (update, ChatMessage::assistant(event.message.as_str()))
        } else {
            return;
        };

        self.sessions.update_with(session_id, |session| {
            update.apply(session);
            session.messages.push(answer);
        });
        tracing::debug!(%session_id, event_type = %event.event_type, "terminal event stored");
    }

    /// The stream for `session_id` ended. The session is left as is.
    pub fn on_done(&self, session_id: &str) {
        tracing::debug!(%session_id, "stopped tracking task");
        self.research.reset();
    }

    /// Fold a polled status into the session. Returns the session as stored
    /// afterwards, or `None` if it does not exist.
    pub fn reconcile(&self, session_id: &str, info: &TaskInfo) -> Option<ChatSession> {
        let status = match info.status {
            TaskStatus::Pending | TaskStatus::Running => SessionStatus::Running,
            TaskStatus::Completed => SessionStatus::Completed,
            TaskStatus::Failed => SessionStatus::Failed,
        };
        let mut update = SessionUpdateBuilder::new().status(status);
        if info.status.is_terminal() && info.result_url.is_some() {
            update = update.result_url(info.result_url.clone());
        }
        let update = update.build();
        let error = info
            .error
            .as_deref()
            .filter(|_| info.status == TaskStatus::Failed);

        let found = self.sessions.update_with(session_id, |session| {
            update.apply(session);
            let has_answer = session
                .messages
                .iter()
                .any(|m| m.role == ChatRole::Assistant);
            if let Some(error) = error
                && !has_answer
            {
                session.messages.push(ChatMessage::assistant(error));
            }
        });
        if !found {
            return None;
        }
        self.sessions.get_session(session_id)
    }

    /// Event callback for a subscription feeding `session_id`.
    pub fn event_handler(&self, session_id: &str) -> impl FnMut(ProgressEvent) + Send + use<> {
        let tracker = self.clone();
        let session_id = session_id.to_string();
        move |event| tracker.on_event(&session_id, &event)
    }

    /// Done callback for a subscription feeding `session_id`.
    pub fn done_handler(&self, session_id: &str) -> impl FnOnce() + Send + use<> {
        let tracker = self.clone();
        let session_id = session_id.to_string();
        move || tracker.on_done(&session_id)
    }
}
