//! Local persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding persisted client state. Empty means the platform
    /// data directory (`~/.local/share/deep` on Linux).
    #[serde(default)]
    pub dir: String,
}

impl StorageConfig {
    /// Directory the file-backed store should use.
    #[must_use]
    pub fn resolve_dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("deep")
        } else {
            PathBuf::from(&self.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_is_used_verbatim() {
        let config = StorageConfig {
            dir: "/tmp/deep-state".into(),
        };
        assert_eq!(config.resolve_dir(), PathBuf::from("/tmp/deep-state"));
    }

    #[test]
    fn empty_dir_falls_back_to_data_dir() {
        let config = StorageConfig::default();
        assert!(config.resolve_dir().ends_with("deep"));
    }
}
