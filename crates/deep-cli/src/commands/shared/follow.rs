use deep_client::OnDone;
use deep_core::entities::ChatSession;
use deep_core::enums::SessionStatus;

use crate::context::AppContext;
use crate::progress::Progress;

/// Stream a session's task progress into the stores until the stream ends,
/// then return the session as stored.
///
/// A stream that stops without a terminal event is followed by one status
/// poll, folded in with [`deep_store::ResearchTracker::reconcile`].
pub async fn follow(session: &ChatSession, ctx: &AppContext) -> anyhow::Result<ChatSession> {
    let tracker = &ctx.tracker;
    tracker.begin(&session.id, &session.task_id);

    let progress = Progress::percent("Waiting for the research service...");
    let listener = {
        let progress = progress.clone();
        ctx.research.subscribe(move |state| {
            if !state.is_idle() {
                progress.update(state.progress, &state.current_step);
            }
        })
    };

    let on_done: OnDone = Box::new(tracker.done_handler(&session.id));
    let subscription = ctx.client.subscribe(
        &session.task_id,
        tracker.event_handler(&session.id),
        Some(on_done),
    );
    subscription.finished().await;
    ctx.research.unsubscribe(listener);

    let mut current = ctx.session(&session.id)?;
    if current.status == SessionStatus::Running {
        match ctx.client.get_status(&current.task_id).await {
            Ok(info) => {
                if let Some(updated) = tracker.reconcile(&current.id, &info) {
                    current = updated;
                }
            }
            Err(error) => tracing::warn!(
                task_id = %current.task_id,
                %error,
                "could not poll task status after the stream ended"
            ),
        }
    }

    match current.status {
        SessionStatus::Completed => progress.finish_ok("Research complete"),
        SessionStatus::Failed => progress.finish_err("Research failed"),
        SessionStatus::Running => {
            progress.finish_clear();
            tracing::warn!(
                session_id = %current.id,
                "task is still running; resume with `deep watch {}`",
                current.id
            );
        }
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use deep_client::ResearchClient;
    use deep_store::MemoryStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Answer requests by exact path with `(status, content type, body)`.
    fn serve(routes: Vec<(&'static str, u16, &'static str, String)>) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let (status, content_type, body) = routes
                    .iter()
                    .find(|(path, ..)| *path == request.url())
                    .map_or((404, "application/json", String::from("{}")), |(_, s, c, b)| {
                        (*s, *c, b.clone())
                    });
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(tiny_http::Header::from_bytes("Content-Type", content_type).unwrap());
                let _ = request.respond(response);
            }
        });
        format!("http://127.0.0.1:{port}")
    }

    fn context(base_url: &str) -> AppContext {
        let config = deep_config::DeepConfig::default()
            .with_base_url(base_url)
            .unwrap();
        AppContext::with_parts(
            ResearchClient::new(&config.api).unwrap(),
            Arc::new(MemoryStorage::new()),
        )
    }

    #[tokio::test]
    async fn completed_stream_finishes_session() {
        let base = serve(vec![(
            "/research/abc123/stream",
            200,
            "text/event-stream",
            concat!(
                "data: {\"event_type\":\"progress\",\"message\":\"Analyzing query...\",\"progress\":5,\"data\":{}}\n\n",
                "data: {\"event_type\":\"completed\",\"message\":\"Research complete!\",\"progress\":100,",
                "\"data\":{\"result_url\":\"https://blob.example/abc123.md\",\"report\":\"# Quantum\"}}\n\n",
            )
            .to_string(),
        )]);
        let ctx = context(&base);
        let session = ctx.sessions.create_session("What is quantum computing?", "abc123");

        let finished = follow(&session, &ctx).await.unwrap();

        assert_eq!(finished.status, SessionStatus::Completed);
        assert_eq!(finished.result_url.as_deref(), Some("https://blob.example/abc123.md"));
        assert_eq!(finished.messages.len(), 2);
        assert_eq!(finished.messages[1].content, "# Quantum");
        assert!(ctx.research.state().is_idle());
    }

    #[tokio::test]
    async fn stream_without_terminal_event_polls_status() {
        let base = serve(vec![
            (
                "/research/abc123/stream",
                200,
                "text/event-stream",
                String::from(
                    "data: {\"event_type\":\"progress\",\"message\":\"Analyzing query...\",\"progress\":5}\n\n",
                ),
            ),
            (
                "/research/abc123",
                200,
                "application/json",
                String::from(
                    r#"{"id":"abc123","status":"failed","progress":40,"messages":[],"result_url":null,"error":"Research failed: timeout"}"#,
                ),
            ),
        ]);
        let ctx = context(&base);
        let session = ctx.sessions.create_session("q", "abc123");

        let finished = follow(&session, &ctx).await.unwrap();

        assert_eq!(finished.status, SessionStatus::Failed);
        assert_eq!(
            finished.messages.last().map(|m| m.content.as_str()),
            Some("Research failed: timeout")
        );
    }

    #[tokio::test]
    async fn unreachable_service_leaves_session_running() {
        let ctx = context("http://127.0.0.1:1");
        let session = ctx.sessions.create_session("q", "abc123");

        let finished = follow(&session, &ctx).await.unwrap();

        assert_eq!(finished, session);
    }
}
