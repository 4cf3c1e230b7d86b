use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One progress step shown while a task runs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchStep {
    pub message: String,
    pub completed: bool,
}

/// Transient view of the task currently being tracked.
///
/// [`ResearchState::default`] is the fixed empty value every reset returns to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchState {
    pub active_task_id: Option<String>,
    pub progress: f64,
    pub current_step: String,
    pub steps: Vec<ResearchStep>,
}

impl ResearchState {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.active_task_id.is_none()
    }
}
