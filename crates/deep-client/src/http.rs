//! Shared HTTP response helpers.
//!
//! Centralizes the non-success → [`ClientError::Api`] mapping and body
//! decoding so request modules stay focused on building requests.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Return the response unchanged on a 2xx status.
///
/// Any other status becomes [`ClientError::Api`] carrying the status text.
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ClientError::Api {
        status: status.as_u16(),
        message: status_text(status),
    })
}

/// Read the whole body and decode it as JSON.
///
/// Decoding failures are reported as [`ClientError::Parse`]; only a broken
/// connection while reading yields [`ClientError::Http`].
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}
