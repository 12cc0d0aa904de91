//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to read or write the backing storage.
    #[error("Store operation failed for key '{key}': {reason}")]
    IoError { key: String, reason: String },

    /// Key contains characters the backend cannot represent.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(key: &str, err: impl std::fmt::Display) -> Self {
        StoreError::IoError {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }

    /// Check if this error came from decoding a stored value.
    pub fn is_corrupt_value(&self) -> bool {
        matches!(self, StoreError::SerializeError(_))
    }
}
