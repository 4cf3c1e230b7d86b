//! Server-sent event subscription to a task's progress stream.
//!
//! A subscription is driven by one background task, so `on_event` is never
//! called concurrently and events are delivered in arrival order. Every way a
//! stream can end other than an explicit [`Subscription::close`] (terminal
//! event, refused connection, error status, broken or malformed stream, server
//! hanging up) funnels into a single `on_done` call.

use std::fmt;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use deep_core::entities::ProgressEvent;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt, future};
use tokio::task::JoinHandle;

use crate::{ResearchClient, http::check_response};

/// Callback run once when a subscription ends on its own.
pub type OnDone = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a live progress stream.
///
/// Dropping the handle does not close the stream; call [`Self::close`] to
/// stop receiving events early.
#[derive(Debug)]
pub struct Subscription {
    task_id: String,
    closed: Arc<AtomicBool>,
    driver: JoinHandle<()>,
}

impl Subscription {
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Whether the stream has been closed, by either side.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Stop the stream. `on_done` is not called for an explicit close.
    ///
    /// Returns `true` if this call closed the stream, `false` if it was
    /// already closed.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.driver.abort();
        tracing::debug!(task_id = %self.task_id, "subscription closed by caller");
        true
    }

    /// Wait until the stream has ended and `on_done` (if any) has returned.
    pub async fn finished(self) {
        if let Err(error) = self.driver.await
            && error.is_panic()
        {
            tracing::warn!(task_id = %self.task_id, %error, "subscription callback panicked");
        }
    }
}

/// Why the event loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StreamEnd {
    /// A `completed` or `failed` event was delivered.
    Terminal,
    /// The caller closed the subscription.
    Closed,
    /// The server ended the stream without a terminal event.
    Ended,
    /// Transport or decoding failure.
    Failed(String),
}

impl ResearchClient {
    /// Subscribe to a task's progress events.
    ///
    /// `on_event` is called for every event in arrival order. After a
    /// `completed`/`failed` event, or if the stream fails for any reason, the
    /// stream is closed and `on_done` runs exactly once. No `on_event` call
    /// follows `on_done`. Failures are never returned from this call: the
    /// connection is opened in the background.
    ///
    /// Must be called within a Tokio runtime.
    pub fn subscribe<F>(&self, task_id: &str, on_event: F, on_done: Option<OnDone>) -> Subscription
    where
        F: FnMut(ProgressEvent) + Send + 'static,
    {
        let url = self.task_url(Some(task_id), "/stream");
        let http = self.http.clone();
        let closed = Arc::new(AtomicBool::new(false));

        let driver = {
            let closed = Arc::clone(&closed);
            let task_id = task_id.to_string();
            tokio::spawn(async move {
                tracing::debug!(%task_id, %url, "opening progress stream");
                let end = match open_stream(&http, &url).await {
                    Ok(resp) => {
                        let messages = resp.bytes_stream().eventsource().filter_map(|item| {
                            future::ready(match item {
                                Ok(event) if is_message(&event.event) => Some(Ok(event.data)),
                                Ok(_) => None,
                                Err(error) => Some(Err(error)),
                            })
                        });
                        drive(pin!(messages), &closed, on_event).await
                    }
                    Err(reason) => StreamEnd::Failed(reason),
                };
                finish(&task_id, &end, &closed, on_done);
            })
        };

        Subscription {
            task_id: task_id.to_string(),
            closed,
            driver,
        }
    }
}

async fn open_stream(http: &reqwest::Client, url: &str) -> Result<reqwest::Response, String> {
    let resp = http
        .get(url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_response(resp).map_err(|e| e.to_string())
}

/// Only unnamed (default `message`) events carry progress payloads.
fn is_message(event_type: &str) -> bool {
    event_type.is_empty() || event_type == "message"
}

/// Deliver parsed events until the stream stops.
///
/// `messages` yields the raw `data` payload of each message event.
pub(crate) async fn drive<S, E, F>(mut messages: S, closed: &AtomicBool, mut on_event: F) -> StreamEnd
where
    S: Stream<Item = Result<String, E>> + Unpin,
    E: fmt::Display,
    F: FnMut(ProgressEvent),
{
    while let Some(item) = messages.next().await {
        if closed.load(Ordering::SeqCst) {
            return StreamEnd::Closed;
        }

        let data = match item {
            Ok(data) => data,
            Err(error) => return StreamEnd::Failed(error.to_string()),
        };
        if data.is_empty() {
            continue;
        }

        let event: ProgressEvent = match serde_json::from_str(&data) {
            Ok(event) => event,
            Err(error) => return StreamEnd::Failed(format!("malformed progress event: {error}")),
        };

        let terminal = event.is_terminal();
        on_event(event);
        if terminal {
            return StreamEnd::Terminal;
        }
    }

    if closed.load(Ordering::SeqCst) {
        StreamEnd::Closed
    } else {
        StreamEnd::Ended
    }
}

/// Close the subscription and run `on_done`, unless the caller got there first.
pub(crate) fn finish(task_id: &str, end: &StreamEnd, closed: &AtomicBool, on_done: Option<OnDone>) {
    match end {
        StreamEnd::Closed => return,
        StreamEnd::Terminal => tracing::debug!(%task_id, "progress stream reached terminal event"),
        StreamEnd::Ended => {
            tracing::debug!(%task_id, "progress stream ended without terminal event");
        }
        StreamEnd::Failed(reason) => tracing::warn!(%task_id, %reason, "progress stream failed"),
    }

    if closed.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Some(done) = on_done {
        done();
    }
}
