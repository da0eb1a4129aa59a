use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use paste_crypto::ContentAddresser;
use paste_types::{Address, FullId, ShortId};

use crate::error::{StoreError, StoreResult};
use crate::index::PrefixIndex;
use crate::traits::BlobBackend;

/// What to do when a short id matches more than one stored paste.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortIdPolicy {
    /// Resolve to the lexicographically smallest matching full id.
    #[default]
    FirstMatch,
    /// Refuse with [`StoreError::Ambiguous`].
    Strict,
}

/// Tunables for a [`BlobStore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub short_id_policy: ShortIdPolicy,
    /// Keep an in-memory sorted index for short-id lookups. When off, every
    /// lookup scans the backend's key space.
    pub prefix_index: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            short_id_policy: ShortIdPolicy::FirstMatch,
            prefix_index: true,
        }
    }
}

/// Outcome of [`BlobStore::verify`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Number of keys examined.
    pub checked: usize,
    /// Keys whose stored bytes no longer hash to the key.
    pub corrupt: Vec<FullId>,
    /// Keys that were listed but could not be read back.
    pub missing: Vec<FullId>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.corrupt.is_empty() && self.missing.is_empty()
    }
}

/// Content-addressed paste store.
///
/// Wraps a [`BlobBackend`] with hashing, deduplication and short-id
/// resolution. Every method takes `&self`; share it behind an `Arc`.
pub struct BlobStore<B> {
    backend: B,
    index: RwLock<PrefixIndex>,
    config: StoreConfig,
}

impl<B: BlobBackend> BlobStore<B> {
    /// Open a store over `backend` with the default configuration.
    pub fn open(backend: B) -> StoreResult<Self> {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Open a store over `backend`. Builds the prefix index from the
    /// backend's current keys when enabled.
    pub fn with_config(backend: B, config: StoreConfig) -> StoreResult<Self> {
        let index = if config.prefix_index {
            backend.enumerate_keys()?.into_iter().collect()
        } else {
            PrefixIndex::new()
        };
        debug!(indexed = index.len(), ?config, "opened paste store");
        Ok(Self {
            backend,
            index: RwLock::new(index),
            config,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Both identifiers for `content`, without storing anything.
    pub fn address(&self, content: &[u8]) -> Address {
        ContentAddresser::address(content)
    }

    /// Store `content` and return its full id.
    ///
    /// Storing content that is already present is a no-op and never fails.
    pub fn put(&self, content: &[u8]) -> StoreResult<FullId> {
        let id = ContentAddresser::full_id(content);
        let written = self.backend.write_if_absent(&id, content)?;
        if self.config.prefix_index {
            self.index.write().expect("lock poisoned").insert(id);
        }
        if written {
            debug!(%id, bytes = content.len(), "stored new paste");
        } else {
            debug!(%id, "paste already stored, skipping write");
        }
        Ok(id)
    }

    /// Read a paste by full id. `Ok(None)` if no paste has that id.
    pub fn get(&self, id: &FullId) -> StoreResult<Option<Vec<u8>>> {
        self.backend.read(id)
    }

    /// Parse `id` as a full id and read it.
    pub fn get_hex(&self, id: &str) -> StoreResult<Option<Vec<u8>>> {
        let id = FullId::from_hex(id)?;
        self.get(&id)
    }

    /// Read a paste's bytes for verbatim serving.
    ///
    /// Same contract as [`get`](Self::get). The bytes are never normalized
    /// or re-encoded; escaping is up to whoever renders them.
    pub fn get_raw(&self, id: &FullId) -> StoreResult<Option<Vec<u8>>> {
        self.get(id)
    }

    /// Read a paste, turning absence into [`StoreError::NotFound`].
    pub fn require(&self, id: &FullId) -> StoreResult<Vec<u8>> {
        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_hex()))
    }

    /// Resolve a short id to the full id it designates under the configured
    /// [`ShortIdPolicy`]. `Ok(None)` if nothing matches.
    pub fn resolve_short_id(&self, short: &ShortId) -> StoreResult<Option<FullId>> {
        let candidates = self.candidates(short)?;
        if candidates.len() <= 1 {
            return Ok(candidates.first().copied());
        }
        match self.config.short_id_policy {
            ShortIdPolicy::FirstMatch => {
                let chosen = candidates[0];
                warn!(
                    prefix = %short,
                    candidates = candidates.len(),
                    %chosen,
                    "ambiguous short id, using smallest match"
                );
                Ok(Some(chosen))
            }
            ShortIdPolicy::Strict => Err(StoreError::Ambiguous {
                prefix: *short,
                candidates,
            }),
        }
    }

    /// Read a paste by short id. `Ok(None)` if nothing matches.
    pub fn get_by_short_id(&self, short: &ShortId) -> StoreResult<Option<Vec<u8>>> {
        match self.resolve_short_id(short)? {
            Some(id) => self.get(&id),
            None => Ok(None),
        }
    }

    /// Parse `short` as a short id and read it.
    pub fn get_by_short_hex(&self, short: &str) -> StoreResult<Option<Vec<u8>>> {
        let short = ShortId::from_hex(short)?;
        self.get_by_short_id(&short)
    }

    /// Every stored id starting with `short`, found by listing the whole key
    /// space. Sorted ascending. This is the reference lookup the index must
    /// agree with.
    pub fn scan_candidates(&self, short: &ShortId) -> StoreResult<Vec<FullId>> {
        let mut matches: Vec<FullId> = self
            .backend
            .enumerate_keys()?
            .into_iter()
            .filter(|id| id.starts_with(short))
            .collect();
        matches.sort();
        Ok(matches)
    }

    fn candidates(&self, short: &ShortId) -> StoreResult<Vec<FullId>> {
        if !self.config.prefix_index {
            return self.scan_candidates(short);
        }

        let mut matches = self.index.read().expect("lock poisoned").matches(short);

        // Another process may have written into the same backend since the
        // index was built, so an index hit is never the whole candidate set.
        let scanned = self.scan_candidates(short)?;
        let stale: Vec<FullId> = scanned
            .iter()
            .filter(|id| matches.binary_search(*id).is_err())
            .copied()
            .collect();
        if !stale.is_empty() {
            debug!(prefix = %short, added = stale.len(), "index missed keys, merging scan");
            let mut index = self.index.write().expect("lock poisoned");
            for id in &stale {
                index.insert(*id);
            }
        }

        matches.extend(stale);
        matches.sort();
        Ok(matches)
    }

    /// Rebuild the prefix index from the backend. Returns the number of
    /// indexed ids.
    pub fn reindex(&self) -> StoreResult<usize> {
        let rebuilt: PrefixIndex = self.backend.enumerate_keys()?.into_iter().collect();
        let count = rebuilt.len();
        *self.index.write().expect("lock poisoned") = rebuilt;
        debug!(indexed = count, "rebuilt prefix index");
        Ok(count)
    }

    /// All stored ids, sorted.
    pub fn ids(&self) -> StoreResult<Vec<FullId>> {
        let mut ids = self.backend.enumerate_keys()?;
        ids.sort();
        Ok(ids)
    }

    /// Number of stored pastes, counted from the backend so writes made by
    /// other processes are included.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.backend.enumerate_keys()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Re-read every stored paste and check it still hashes to its id.
    pub fn verify(&self) -> StoreResult<VerifyReport> {
        let mut report = VerifyReport::default();
        for id in self.ids()? {
            report.checked += 1;
            match self.backend.read(&id)? {
                Some(data) if ContentAddresser::verify(&data, &id) => {}
                Some(_) => {
                    warn!(%id, "stored paste does not match its id");
                    report.corrupt.push(id);
                }
                None => {
                    warn!(%id, "listed paste could not be read");
                    report.missing.push(id);
                }
            }
        }
        Ok(report)
    }
}

impl<B> std::fmt::Debug for BlobStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indexed = self.index.read().map(|i| i.len()).unwrap_or_default();
        f.debug_struct("BlobStore")
            .field("config", &self.config)
            .field("indexed", &indexed)
            .finish()
    }
}
