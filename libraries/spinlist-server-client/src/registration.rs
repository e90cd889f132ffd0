//! Registering uploaded tracks with the Spinlist backend.

use crate::error::{Result, ServerClientError};
use reqwest::Client;
use spinlist_core::{RegistrationResponse, TrackRegistration};
use std::time::Duration;
use tracing::{info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Registration client for the Spinlist backend.
pub struct RegistrationClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> RegistrationClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Record an uploaded file so it appears in the track list.
    ///
    /// A `success: false` acknowledgment is returned as-is.
    pub async fn register(&self, registration: &TrackRegistration) -> Result<RegistrationResponse> {
        let url = format!("{}/api/upload-audio", self.base_url);

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(registration)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        if !response.status().is_success() {
            return Err(ServerClientError::from_response(response).await);
        }

        let ack: RegistrationResponse = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse registration response: {}", e))
        })?;

        if ack.success {
            info!(
                file = %registration.file_name,
                public_id = %registration.public_id,
                "Track registered"
            );
        } else {
            warn!(file = %registration.file_name, "Backend declined registration");
        }

        Ok(ack)
    }
}
