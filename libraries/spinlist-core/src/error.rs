//! Core error types for Spinlist

use thiserror::Error;

/// Result type alias using `SpinlistError`
pub type Result<T> = std::result::Result<T, SpinlistError>;

/// Core error type for Spinlist
///
/// This is the error collaborators (track listing, upload transport, backend
/// registration) report back to the application.
#[derive(Error, Debug)]
pub enum SpinlistError {
    /// Network or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Remote service answered with a failure status
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response could not be understood
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend refused to register an uploaded track
    #[error("Registration rejected for {0}")]
    RegistrationRejected(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SpinlistError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the failure came from the transport rather than the caller
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Server { .. } | Self::Parse(_) | Self::Io(_)
        )
    }
}
