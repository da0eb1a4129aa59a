use paste_types::{FullId, ShortId, TypeError};

/// Errors from paste store operations.
///
/// A well-formed id with no stored paste is not an error: lookups return
/// `Ok(None)`. [`StoreError::NotFound`] only appears when a caller asks for
/// absence to be treated as a failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The supplied identifier is not valid hex of the expected length.
    #[error("invalid id: {0}")]
    InvalidId(#[from] TypeError),

    /// The requested paste does not exist.
    #[error("paste not found: {0}")]
    NotFound(String),

    /// More than one stored paste carries the short id, and the store is
    /// configured to refuse to guess.
    #[error("short id {prefix} is ambiguous ({} candidates)", .candidates.len())]
    Ambiguous {
        prefix: ShortId,
        candidates: Vec<FullId>,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A finished temp file could not be published under its final name.
    #[error("failed to persist paste {id}: {reason}")]
    Persist { id: FullId, reason: String },
}

impl StoreError {
    /// Whether this error comes from the persistence medium rather than from
    /// the caller's input.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Persist { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
