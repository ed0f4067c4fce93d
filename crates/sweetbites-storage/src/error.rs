//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing a storage slot.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store cannot be used at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store's quota.
    #[error("Quota exceeded writing {key}: needs {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The key cannot be represented by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a value before writing it.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored value could not be deserialized.
    #[error("Malformed value in {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Whether the slot was readable but its contents did not parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
