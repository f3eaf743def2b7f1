//! Fragment and document error types.

use thiserror::Error;

/// Errors raised while rendering fragments or encoding documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A fragment was rendered without a row alias to correlate against.
    #[error("row alias must not be empty")]
    EmptyAlias,

    /// An identifier contains a character that cannot be quoted.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Writing rendered SQL failed.
    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Document encoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
