//! Foundation types for Pastebin Lite.
//!
//! Every paste is addressed by the SHA-256 digest of its bytes. This crate
//! holds the identifier types shared by the hasher, the store and the HTTP
//! layer. It performs no hashing itself.
//!
//! # Key Types
//!
//! - [`FullId`] — 32-byte digest, rendered as 64 lowercase hex characters
//! - [`ShortId`] — first 4 digest bytes (8 hex characters); not unique
//! - [`Address`] — the `(FullId, ShortId)` pair handed back to callers

pub mod address;
pub mod error;
pub mod id;

pub use address::Address;
pub use error::TypeError;
pub use id::{FullId, ShortId, FULL_ID_HEX_LEN, SHORT_ID_HEX_LEN};
