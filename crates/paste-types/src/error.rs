use thiserror::Error;

/// Errors produced when parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid identifier length: expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
