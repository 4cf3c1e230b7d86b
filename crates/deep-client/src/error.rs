//! Client error types.

use thiserror::Error;

/// Errors returned by task service requests.
///
/// [`ClientError::Http`] is a transport failure (the service could not be
/// reached or the connection broke). [`ClientError::Api`] and
/// [`ClientError::Parse`] are protocol failures: the service answered, but
/// not with something usable.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Status text of the response (e.g. `Not Found`).
        message: String,
    },

    /// The response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Transport-level failure: nothing usable came back from the service.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// The service answered with an error status or an unreadable body.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Parse(_))
    }
}
