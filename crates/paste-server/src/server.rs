use tokio::net::TcpListener;

use paste_store::{BlobBackend, BlobStore, FsBackend};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::{AppState, PasteStore};

/// Pastebin HTTP server.
pub struct PasteServer {
    config: ServerConfig,
}

impl PasteServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the pastes directory named in the config, creating it if needed.
    pub fn open_store(&self) -> ServerResult<PasteStore> {
        let backend: Box<dyn BlobBackend> = Box::new(FsBackend::open(&self.config.pastes_dir)?);
        Ok(BlobStore::with_config(backend, self.config.store.clone())?)
    }

    /// Build the router over an already opened store (useful for testing).
    pub fn router(&self, store: PasteStore) -> axum::Router {
        build_router(AppState::new(store, self.config.clone()))
    }

    /// Open the store and start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let store = self.open_store()?;
        let pastes = store.len()?;
        let app = self.router(store);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            pastes,
            dir = %self.config.pastes_dir.display(),
            "pastebin server listening on http://{}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
