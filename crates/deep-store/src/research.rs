//! Progress of the task currently being tracked. Never persisted.

use std::sync::Arc;

use deep_core::entities::{ProgressEvent, ResearchState, ResearchStep};

use crate::observable::{ListenerId, Observable};

#[derive(Debug, Clone, Default)]
pub struct ResearchStore {
    state: Observable<ResearchState>,
}

impl ResearchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> Arc<ResearchState> {
        self.state.get()
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ResearchState) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn set(&self, state: ResearchState) {
        self.state.set(state);
    }

    /// Back to no active task, zero progress, no steps.
    pub fn reset(&self) {
        self.state.set(ResearchState::default());
    }

    /// Start tracking `task_id` from a clean state.
    pub fn begin(&self, task_id: &str) {
        self.state.set(ResearchState {
            active_task_id: Some(task_id.to_string()),
            ..ResearchState::default()
        });
    }

    /// Fold one progress event into the step list.
    pub fn record_event(&self, event: &ProgressEvent) {
        let terminal = event.is_terminal();
        self.state.update(|current| {
            let mut steps: Vec<ResearchStep> = current
                .steps
                .iter()
                .map(|step| ResearchStep {
                    message: step.message.clone(),
                    completed: true,
                })
                .collect();
            steps.push(ResearchStep {
                message: event.message.clone(),
                completed: terminal,
            });

            ResearchState {
                active_task_id: current.active_task_id.clone(),
                progress: event.progress,
                current_step: event.message.clone(),
                steps,
            }
        });
    }

    pub fn finish(&self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn event(kind: &str, message: &str, progress: f64) -> ProgressEvent {
        ProgressEvent {
            event_type: kind.into(),
            message: message.into(),
            progress,
            data: None,
        }
    }

    #[test]
    fn starts_idle() {
        assert_eq!(*ResearchStore::new().state(), ResearchState::default());
    }

    #[test]
    fn events_build_step_history() {
        let store = ResearchStore::new();
        store.begin("abc123");
        store.record_event(&event("progress", "Analyzing query...", 5.0));
        store.record_event(&event("progress", "Searching sources...", 40.0));

        let state = store.state();
        assert_eq!(state.active_task_id.as_deref(), Some("abc123"));
        assert_eq!(state.current_step, "Searching sources...");
        assert!((state.progress - 40.0).abs() < f64::EPSILON);
        assert_eq!(
            state.steps,
            vec![
                ResearchStep {
                    message: "Analyzing query...".into(),
                    completed: true,
                },
                ResearchStep {
                    message: "Searching sources...".into(),
                    completed: false,
                },
            ]
        );
    }

    #[test]
    fn terminal_event_completes_every_step() {
        let store = ResearchStore::new();
        store.begin("abc123");
        store.record_event(&event("progress", "Analyzing query...", 5.0));
        store.record_event(&event("completed", "Research complete!", 100.0));

        assert!(store.state().steps.iter().all(|s| s.completed));
    }

    #[test]
    fn reset_yields_empty_shape_from_any_state() {
        let store = ResearchStore::new();
        store.begin("abc123");
        store.record_event(&event("progress", "x", 50.0));
        store.reset();

        assert_eq!(
            serde_json::to_value(&*store.state()).unwrap(),
            serde_json::json!({
                "activeTaskId": null,
                "progress": 0.0,
                "currentStep": "",
                "steps": []
            })
        );
    }

    #[test]
    fn begin_discards_previous_task() {
        let store = ResearchStore::new();
        store.begin("first");
        store.record_event(&event("progress", "x", 50.0));
        store.begin("second");

        let state = store.state();
        assert_eq!(state.active_task_id.as_deref(), Some("second"));
        assert!(state.steps.is_empty());
    }
}
