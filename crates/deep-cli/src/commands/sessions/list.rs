use chrono::{DateTime, Utc};
use deep_core::entities::ChatSession;
use deep_core::enums::SessionStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// One line of `deep sessions list`.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub status: SessionStatus,
    pub task_id: String,
    pub messages: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatSession> for SessionSummary {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            status: session.status,
            task_id: session.task_id.clone(),
            messages: session.messages.len(),
            created_at: session.created_at,
        }
    }
}

pub fn run(
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|value| parse_enum::<SessionStatus>(value, "status"))
        .transpose()?;
    let sessions = ctx.sessions.sessions();
    let summaries = select(&sessions, status, effective_limit(limit, 20));
    output(&summaries, flags.format)
}

fn select(
    sessions: &[ChatSession],
    status: Option<SessionStatus>,
    limit: usize,
) -> Vec<SessionSummary> {
    sessions
        .iter()
        .filter(|session| status.is_none_or(|wanted| session.status == wanted))
        .take(limit)
        .map(SessionSummary::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use deep_store::{MemoryStorage, SessionStore};
    use deep_store::updates::SessionUpdateBuilder;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn filters_by_status_and_keeps_order() {
        let store = SessionStore::load(Arc::new(MemoryStorage::new()));
        let a = store.create_session("a", "t1");
        store.create_session("b", "t2");
        let c = store.create_session("c", "t3");
        let done = SessionUpdateBuilder::new()
            .status(SessionStatus::Completed)
            .build();
        store.update_session(&a.id, &done);
        store.update_session(&c.id, &done);

        let ids: Vec<String> = select(&store.sessions(), Some(SessionStatus::Completed), 20)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![c.id, a.id]);
    }

    #[test]
    fn limit_truncates_most_recent_first() {
        let store = SessionStore::load(Arc::new(MemoryStorage::new()));
        store.create_session("a", "t1");
        let b = store.create_session("b", "t2");

        let summaries = select(&store.sessions(), None, 1);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, b.id);
        assert_eq!(summaries[0].messages, 1);
    }
}
