//! HTTP server for Pastebin Lite.
//!
//! A thin boundary over [`paste_store::BlobStore`]: an HTML form for
//! submitting pastes, escaped paste pages, short-id redirects, a raw
//! plain-text endpoint and a small JSON API.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod views;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::PasteServer;
pub use state::{AppState, PasteStore};
