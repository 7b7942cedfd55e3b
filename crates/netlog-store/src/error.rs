//! Error types for netlog-store

use thiserror::Error;

/// Store error type
#[derive(Debug, Error)]
pub enum Error {
    /// Table creation failed (table already present or statement rejected)
    #[error("schema error: {0}")]
    Schema(#[source] sqlx::Error),

    /// Engine-level failure while reading or writing rows
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a record
    #[error("corrupt record {id}: {reason}")]
    RecordCorruption {
        /// Row identifier
        id: i64,
        /// What failed to decode
        reason: String,
    },

    /// Record fields could not be encoded for storage
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while preparing the database location
    #[error("io error: {0}")]
    Io(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
