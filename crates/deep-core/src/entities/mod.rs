//! Entity structs for remote task data and local client state.
//!
//! Remote types (`TaskHandle`, `TaskInfo`, `ProgressEvent`) mirror the task
//! service's JSON and are never mutated locally. Local types (`ChatSession`,
//! `ResearchState`) are owned by the stores in `deep-store`.

mod event;
mod research;
mod session;
mod task;

pub use event::{EVENT_COMPLETED, EVENT_FAILED, EVENT_PROGRESS, ProgressEvent};
pub use research::{ResearchState, ResearchStep};
pub use session::{ChatMessage, ChatSession, TITLE_MAX_CHARS};
pub use task::{TaskHandle, TaskInfo, TaskMessage};
