/// Player error types
use spinlist_core::SpinlistError;
use spinlist_playback::{PlaybackError, UploadError};
use spinlist_server_client::ServerClientError;
use spinlist_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Remote(#[from] SpinlistError),

    #[error("Client error: {0}")]
    Client(#[from] ServerClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
