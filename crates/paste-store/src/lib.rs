//! Content-addressed paste storage for Pastebin Lite.
//!
//! Every paste is stored once, under the SHA-256 digest of its bytes, and
//! read back by that full id or by its 8-character short id.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobBackend`] trait:
//!
//! - [`InMemoryBackend`] -- `HashMap`-based store for tests and embedding
//! - [`FsBackend`] -- a directory of `<fullid>.txt` files
//!
//! # Design Rules
//!
//! 1. Pastes are immutable once written; there is no update or delete.
//! 2. Writing content that is already stored is a silent no-op.
//! 3. A reader never observes a partially written paste.
//! 4. Absence is `Ok(None)`, never an empty value and never an error.
//! 5. Short-id collisions resolve per [`ShortIdPolicy`], deterministically
//!    for a stable key space.
//! 6. All I/O errors are propagated, never silently ignored or retried.

pub mod error;
pub mod fs;
pub mod index;
pub mod memory;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsBackend;
pub use index::PrefixIndex;
pub use memory::InMemoryBackend;
pub use store::{BlobStore, ShortIdPolicy, StoreConfig, VerifyReport};
pub use traits::BlobBackend;

/// A store persisted to a pastes directory.
pub type FsBlobStore = BlobStore<FsBackend>;
