//! # deep-core
//!
//! Core types shared across the deep research client crates:
//! - Remote task types (`TaskInfo`, `TaskHandle`, `ProgressEvent`) as they
//!   appear on the wire
//! - Local entities (`ChatSession`, `ResearchState`) owned by the stores
//! - Status and role enums for both lifecycles
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
