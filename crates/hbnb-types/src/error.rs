use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown class name: {0:?}")]
    UnknownClass(String),

    #[error("invalid composite key: {0:?}")]
    InvalidKey(String),

    #[error("empty record id")]
    EmptyId,

    #[error("reserved attribute stored on record: {0:?}")]
    ReservedAttribute(String),
}
