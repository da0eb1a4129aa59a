//! Content addressing for Pastebin Lite.
//!
//! Maps a byte sequence to its [`FullId`](paste_types::FullId) (SHA-256,
//! hex-rendered) and [`ShortId`](paste_types::ShortId) (first 8 hex
//! characters). Pure functions only: no I/O, no shared state.
//!
//! Hashing wraps the `sha2` crate; there is no custom cryptography here.

pub mod addresser;

pub use addresser::ContentAddresser;
