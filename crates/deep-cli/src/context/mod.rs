use std::sync::Arc;

use anyhow::Context;
use deep_client::ResearchClient;
use deep_config::DeepConfig;
use deep_store::{FileStorage, ResearchStore, ResearchTracker, SessionStore, Storage};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub client: ResearchClient,
    pub sessions: SessionStore,
    pub research: ResearchStore,
    pub tracker: ResearchTracker,
}

impl AppContext {
    /// Build the HTTP client and load session history from the configured
    /// storage directory.
    pub fn init(config: &DeepConfig) -> anyhow::Result<Self> {
        let client =
            ResearchClient::new(&config.api).context("failed to build research service client")?;
        let storage_dir = config.storage.resolve_dir();
        tracing::debug!(
            base_url = %client.base_url(),
            storage = %storage_dir.display(),
            "initializing application context"
        );

        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(storage_dir));
        Ok(Self::with_parts(client, storage))
    }

    /// Assemble a context from already-built parts.
    pub fn with_parts(client: ResearchClient, storage: Arc<dyn Storage>) -> Self {
        let sessions = SessionStore::load(storage);
        let research = ResearchStore::new();
        let tracker = ResearchTracker::new(sessions.clone(), research.clone());
        Self {
            client,
            sessions,
            research,
            tracker,
        }
    }

    /// Look up a local session, failing with a readable error if it is unknown.
    pub fn session(&self, id: &str) -> anyhow::Result<deep_core::entities::ChatSession> {
        self.sessions
            .get_session(id)
            .with_context(|| format!("session '{id}' not found (see `deep sessions list`)"))
    }
}
