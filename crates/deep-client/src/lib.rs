//! # deep-client
//!
//! HTTP client for the research task service.
//!
//! Four operations against a configured base URL:
//! - [`ResearchClient::start`]: `POST /research`
//! - [`ResearchClient::get_status`]: `GET /research/{id}`
//! - [`ResearchClient::subscribe`]: server-sent events from `GET /research/{id}/stream`
//! - [`ResearchClient::cancel`]: fire-and-forget `POST /research/{id}/cancel`
//!
//! The client holds no task state. No request is retried.

mod error;
mod http;
mod research;
mod stream;

pub use error::ClientError;
pub use stream::{OnDone, Subscription};

use std::time::Duration;

use deep_config::ApiConfig;

/// HTTP client for the research task service.
#[derive(Debug, Clone)]
pub struct ResearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResearchClient {
    /// Build a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. no TLS backend available).
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self::with_http(http, config.base_url_trimmed()))
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the research collection or of one task's sub-resource.
    ///
    /// `task_id` is percent-encoded; `suffix` is appended verbatim.
    fn task_url(&self, task_id: Option<&str>, suffix: &str) -> String {
        match task_id {
            Some(id) => format!(
                "{}/research/{}{suffix}",
                self.base_url,
                urlencoding::encode(id)
            ),
            None => format!("{}/research{suffix}", self.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ResearchClient {
        ResearchClient::with_http(reqwest::Client::new(), base)
    }

    #[test]
    fn builds_from_default_config() {
        let client = ResearchClient::new(&ApiConfig::default()).expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn task_urls() {
        let c = client("http://localhost:8000/");
        assert_eq!(c.task_url(None, ""), "http://localhost:8000/research");
        assert_eq!(
            c.task_url(Some("abc123"), ""),
            "http://localhost:8000/research/abc123"
        );
        assert_eq!(
            c.task_url(Some("abc123"), "/stream"),
            "http://localhost:8000/research/abc123/stream"
        );
    }

    #[test]
    fn task_id_is_percent_encoded() {
        let c = client("http://svc");
        assert_eq!(
            c.task_url(Some("a/b c"), "/cancel"),
            "http://svc/research/a%2Fb%20c/cancel"
        );
    }
}
