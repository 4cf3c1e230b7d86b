//! Cross-cutting error types.
//!
//! Transport and storage errors live in `deep-client` and `deep-store`. This
//! module only covers failures that can be raised while handling core values.

use thiserror::Error;

/// Errors raised by core type conversions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value failed validation (unknown enum variant, bad format).
    #[error("Validation error: {0}")]
    Validation(String),
}
