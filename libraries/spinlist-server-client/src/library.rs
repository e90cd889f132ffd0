//! Track listing against the Spinlist backend.

use crate::error::{Result, ServerClientError};
use reqwest::Client;
use spinlist_core::Track;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Library client for the Spinlist backend.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get every registered track, oldest first.
    pub async fn list_tracks(&self) -> Result<Vec<Track>> {
        let url = format!("{}/api/get-all-audios", self.base_url);
        debug!(url = %url, "Fetching track list");

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        if !response.status().is_success() {
            return Err(ServerClientError::from_response(response).await);
        }

        let tracks: Vec<Track> = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse track list: {}", e))
        })?;

        debug!(tracks = tracks.len(), "Fetched track list");
        Ok(tracks)
    }
}
