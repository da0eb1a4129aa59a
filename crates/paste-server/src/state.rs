use std::sync::Arc;

use paste_store::{BlobBackend, BlobStore, StoreResult};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// The store as seen by request handlers: backend chosen at startup.
pub type PasteStore = BlobStore<Box<dyn BlobBackend>>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PasteStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: PasteStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Run a store operation on the blocking thread pool. Filesystem
    /// backends do synchronous I/O and must stay off the async workers.
    pub async fn with_store<T, F>(&self, op: F) -> ServerResult<T>
    where
        F: FnOnce(&PasteStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .map_err(ServerError::from)
    }
}
