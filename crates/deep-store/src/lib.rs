//! # deep-store
//!
//! Client-side state for research sessions:
//! - [`Observable`]: a shared value with synchronous change listeners
//! - [`SessionStore`]: the persisted, most-recent-first list of chat sessions
//! - [`ResearchStore`]: transient progress of the task currently tracked
//! - [`ResearchTracker`]: folds a task's progress events into both stores
//! - [`Storage`]: string-keyed persistence, file-backed or in-memory
//!
//! Stores are cheap handles: clones share one underlying value.

mod error;
mod observable;
mod research;
mod sessions;
mod storage;
mod sync;
pub mod updates;

pub use error::StoreError;
pub use observable::{ListenerId, Observable};
pub use research::ResearchStore;
pub use sessions::{SESSIONS_KEY, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use sync::ResearchTracker;
