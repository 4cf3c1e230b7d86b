//! Task service endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Local development address of the task service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("deep/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the research task service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// TCP connect timeout. Requests themselves have no deadline: research
    /// streams stay open for as long as the task runs.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check that `base_url` is an absolute `http`/`https` URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming `api.base_url`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            reason,
        };

        let parsed = url::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// Base URL without trailing slashes, ready for path concatenation.
    #[must_use]
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(config.user_agent.starts_with("deep/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ApiConfig {
            base_url: "https://research.example.com/api//".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url_trimmed(), "https://research.example.com/api");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = ApiConfig {
            base_url: "ftp://research.example.com".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "api.base_url"));
    }

    #[test]
    fn rejects_relative_url() {
        let config = ApiConfig {
            base_url: "localhost:8000/research".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
