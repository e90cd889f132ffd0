//! Error types for playback management

use spinlist_storage::StorageError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index outside the current track list
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// No media handle is rendered for this index
    #[error("No media handle for index {0}")]
    NoMediaHandle(usize),

    /// Media handle refused an operation (autoplay policy, unsupported seek, ...)
    #[error("Media error: {0}")]
    Media(String),

    /// Persisting the session failed; in-memory state was still updated
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Upload tracker errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// A job is already in progress
    #[error("Upload job already running")]
    JobAlreadyRunning,

    /// The selected file has no content
    #[error("Cannot upload empty file: {0}")]
    EmptyFile(String),

    /// No job is in progress
    #[error("No upload in progress")]
    NoActiveJob,
}
