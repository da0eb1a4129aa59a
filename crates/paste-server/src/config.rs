use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use paste_store::StoreConfig;

use crate::error::{ServerError, ServerResult};

/// Server settings. Every field has a default, so a TOML file only needs the
/// keys it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding one `<fullid>.txt` file per paste.
    pub pastes_dir: PathBuf,
    /// Largest accepted request body on the paste-creating routes.
    pub max_body_bytes: usize,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            pastes_dir: PathBuf::from("./pastes"),
            max_body_bytes: 100 * 1024,
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
