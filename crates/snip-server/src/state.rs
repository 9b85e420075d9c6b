use std::sync::Arc;
use std::time::Instant;

use snip_sdk::{AccessGate, SdkResult, Snippets};
use snip_store::{FileSnippetStore, InMemorySnippetStore, SnippetStore};

use crate::config::ServerConfig;
use crate::error::{ApiError, ServerResult};

/// The snippet API over whichever backend the config selects.
pub type SharedSnippets = Snippets<Arc<dyn SnippetStore>>;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    snippets: Arc<SharedSnippets>,
    started_at: Instant,
}

impl AppState {
    pub fn new(snippets: SharedSnippets) -> Self {
        Self {
            snippets: Arc::new(snippets),
            started_at: Instant::now(),
        }
    }

    /// Open the configured store and wire up the access gate.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn SnippetStore> = match &config.data_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "using file-backed snippet store");
                Arc::new(FileSnippetStore::open(path)?)
            }
            None => {
                tracing::info!("using in-memory snippet store");
                Arc::new(InMemorySnippetStore::new())
            }
        };
        let gate = AccessGate::new(config.admin_password.clone());
        if !gate.is_configured() {
            tracing::warn!("no admin password configured; publishing is disabled");
        }
        Ok(Self::new(Snippets::new(store, gate)))
    }

    pub fn snippets(&self) -> &SharedSnippets {
        &self.snippets
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Run a snippet operation off the async runtime.
    ///
    /// Store writes may touch disk and highlighting is CPU-bound, so both go
    /// through the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&SharedSnippets) -> SdkResult<T> + Send + 'static,
    {
        let snippets = Arc::clone(&self.snippets);
        let result = tokio::task::spawn_blocking(move || op(&snippets))
            .await
            .map_err(ApiError::internal)?;
        Ok(result?)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("snippets", &self.snippets)
            .finish()
    }
}
