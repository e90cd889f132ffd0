/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing store cannot be reached (e.g. no `localStorage` in this context)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backing store refused a write (quota, private mode, ...)
    #[error("Write failed for {key}: {message}")]
    Write { key: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a write error
    pub fn write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for spinlist_core::SpinlistError {
    fn from(err: StorageError) -> Self {
        spinlist_core::SpinlistError::Other(format!("Storage error: {err}"))
    }
}
