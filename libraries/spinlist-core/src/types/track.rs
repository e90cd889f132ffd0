/// Track type as listed by the backend
use serde::{Deserialize, Serialize};

use super::TrackId;

/// A single playable audio item
///
/// Immutable once listed. The backend stores documents with an `_id` key; a
/// plain `id` is accepted too so fixtures and other backends deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Backend identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: TrackId,

    /// Display name (the uploaded file's name)
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Playable URL on the media host
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            file_name: file_name.into(),
            audio_url: audio_url.into(),
        }
    }

    /// Reorder a repository listing for display, newest upload first
    ///
    /// The repository returns tracks in insertion order.
    pub fn newest_first(mut tracks: Vec<Track>) -> Vec<Track> {
        tracks.reverse();
        tracks
    }
}
