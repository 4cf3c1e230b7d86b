use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event kind the service emits while a task advances.
pub const EVENT_PROGRESS: &str = "progress";
/// Terminal event kind: the task finished successfully.
pub const EVENT_COMPLETED: &str = "completed";
/// Terminal event kind: the task failed or was cancelled.
pub const EVENT_FAILED: &str = "failed";

/// One streamed notification about a task.
///
/// `event_type` is free-form; only [`EVENT_COMPLETED`] and [`EVENT_FAILED`]
/// carry meaning for the client (they end a subscription).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProgressEvent {
    pub event_type: String,
    pub message: String,
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ProgressEvent {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.event_type == EVENT_COMPLETED
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.event_type == EVENT_FAILED
    }

    /// Whether this event ends the subscription it arrived on.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_completed() || self.is_failed()
    }

    /// Location of the finished report, attached to `completed` events.
    #[must_use]
    pub fn result_url(&self) -> Option<&str> {
        self.data_str("result_url")
    }

    /// Full report text, attached to `completed` events.
    #[must_use]
    pub fn report(&self) -> Option<&str> {
        self.data_str("report")
    }

    fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .and_then(serde_json::Value::as_str)
    }
}
