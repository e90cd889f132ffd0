/// Upload and registration types
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An audio file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Display name, also used as the track's `fileName`
    pub file_name: String,

    /// File contents
    pub bytes: Bytes,
}

impl UploadFile {
    /// Create a new upload file
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the blob is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> &'static str {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("mp3") => "audio/mpeg",
            Some("flac") => "audio/flac",
            Some("ogg") => "audio/ogg",
            Some("opus") => "audio/opus",
            Some("wav") => "audio/wav",
            Some("m4a" | "aac") => "audio/mp4",
            _ => "application/octet-stream",
        }
    }
}

/// Progress report from the upload transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes handed to the transport so far
    pub bytes_loaded: u64,

    /// Total bytes (0 when unknown)
    pub bytes_total: u64,
}

/// Media host response for a finished upload
///
/// Only the two fields Spinlist needs; the host sends many more.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadedMedia {
    /// Durable playable URL
    pub secure_url: String,

    /// Media host identifier
    pub public_id: String,
}

/// Request body registering an uploaded file with the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRegistration {
    /// Playable URL returned by the media host
    #[serde(rename = "audioUrl")]
    pub audio_url: String,

    /// Media host identifier
    pub public_id: String,

    /// Display name
    #[serde(rename = "fileName")]
    pub file_name: String,
}

impl TrackRegistration {
    /// Build the registration for a finished upload
    pub fn for_upload(media: &UploadedMedia, file_name: impl Into<String>) -> Self {
        Self {
            audio_url: media.secure_url.clone(),
            public_id: media.public_id.clone(),
            file_name: file_name.into(),
        }
    }
}

/// Backend acknowledgment of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RegistrationResponse {
    /// Whether the track was stored
    #[serde(default)]
    pub success: bool,
}
