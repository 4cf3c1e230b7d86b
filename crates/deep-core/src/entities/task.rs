use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

/// Identifier returned by the service when a task is started.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskHandle {
    pub task_id: String,
}

/// A role-tagged message recorded by the service while a task runs.
///
/// Roles are free-form here; the service currently only emits `assistant`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Point-in-time snapshot of a remote task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskInfo {
    pub id: String,
    pub status: TaskStatus,
    /// Percentage in `0..=100`. Non-decreasing by convention only.
    pub progress: f64,
    #[serde(default)]
    pub messages: Vec<TaskMessage>,
    #[serde(default)]
    pub result_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// RFC 3339 creation time as reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
