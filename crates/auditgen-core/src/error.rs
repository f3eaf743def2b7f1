//! Core error types.

use thiserror::Error;

/// Errors raised while generating audit extensions.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity lacks an attribute the generator depends on.
    #[error("entity '{entity}' has no attribute '{attribute}'")]
    MissingAttribute {
        /// Qualified entity name.
        entity: String,
        /// Attribute that was looked up.
        attribute: String,
    },

    /// An annotation refers to a class that is not in the snapshot.
    #[error("unknown class id {0}")]
    UnknownClass(u32),

    /// Snapshot or options decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an input file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Fragment rendering or document encoding failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] auditgen_proto::Error),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
