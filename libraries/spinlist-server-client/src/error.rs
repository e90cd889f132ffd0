//! Error types for the Spinlist HTTP clients.

use spinlist_core::SpinlistError;
use thiserror::Error;

/// Errors that can occur when talking to the backend or the media host.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No media host upload endpoint configured
    #[error("Media host upload URL is not configured")]
    UploadNotConfigured,

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ServerClientError {
    /// Classify a transport error, separating connection failures
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }

    /// Build a `ServerError` from a non-success response
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Self::ServerError { status, message }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for SpinlistError {
    fn from(e: ServerClientError) -> Self {
        match e {
            ServerClientError::Request(e) => SpinlistError::Network(e.to_string()),
            ServerClientError::ServerUnreachable(msg) => SpinlistError::Network(msg),
            ServerClientError::ServerError { status, message } => {
                SpinlistError::Server { status, message }
            }
            ServerClientError::ParseError(msg) => SpinlistError::Parse(msg),
            ServerClientError::InvalidUrl(msg) => SpinlistError::InvalidInput(msg),
            e @ ServerClientError::UploadNotConfigured => SpinlistError::InvalidInput(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_core() {
        let err: SpinlistError = ServerClientError::ServerError {
            status: 503,
            message: "down".into(),
        }
        .into();

        assert!(matches!(err, SpinlistError::Server { status: 503, .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn test_configuration_errors_are_not_transport() {
        let err: SpinlistError = ServerClientError::UploadNotConfigured.into();
        assert!(!err.is_transport());
    }
}
