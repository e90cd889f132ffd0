//! Main Spinlist HTTP client.

use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::registration::RegistrationClient;
use crate::types::ServerConfig;
use crate::upload::UploadClient;
use async_trait::async_trait;
use reqwest::Client;
use spinlist_core::{
    ProgressCallback, RegistrationResponse, Track, TrackRegistrar, TrackRegistration,
    TrackRepository, UploadFile, UploadTransport, UploadedMedia,
};
use std::time::Duration;
use tracing::debug;

/// Client for the Spinlist backend and the media host.
///
/// Implements the three collaborator traits from `spinlist-core`, so the
/// application can hold it behind `Arc<dyn TrackRepository>` and friends.
///
/// # Example
///
/// ```ignore
/// use spinlist_server_client::{ServerConfig, SpinlistClient};
///
/// let config = ServerConfig::new("http://localhost:5000")
///     .with_media_host("https://api.media.example/v1/upload", "my-preset");
/// let client = SpinlistClient::new(config)?;
///
/// let tracks = client.library().list_tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct SpinlistClient {
    http: Client,
    config: ServerConfig,
}

impl SpinlistClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let api_url = normalize_url(&config.api_url)?;
        let upload_url = config
            .upload_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(normalize_url)
            .transpose()?;

        let normalized_config = ServerConfig {
            api_url,
            upload_url,
            upload_preset: config.upload_preset,
        };

        // Per-request timeouts are set by the sub-clients; uploads run long
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Spinlist/{} (CLI)", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(api_url = %normalized_config.api_url, "Created Spinlist client");

        Ok(Self {
            http,
            config: normalized_config,
        })
    }

    /// Get the backend URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Get the media host upload URL, if configured.
    pub fn upload_url(&self) -> Option<&str> {
        self.config.upload_url.as_deref()
    }

    /// Get a library client for listing tracks.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.config.api_url)
    }

    /// Get an upload client for the media host.
    ///
    /// Returns an error if no upload URL is configured.
    pub fn media_host(&self) -> Result<UploadClient<'_>> {
        let upload_url = self
            .config
            .upload_url
            .as_deref()
            .ok_or(ServerClientError::UploadNotConfigured)?;

        Ok(UploadClient::new(
            &self.http,
            upload_url,
            &self.config.upload_preset,
        ))
    }

    /// Get a registration client for recording uploads with the backend.
    pub fn registration(&self) -> RegistrationClient<'_> {
        RegistrationClient::new(&self.http, &self.config.api_url)
    }
}

#[async_trait]
impl TrackRepository for SpinlistClient {
    async fn list_tracks(&self) -> spinlist_core::Result<Vec<Track>> {
        Ok(self.library().list_tracks().await?)
    }
}

#[async_trait]
impl UploadTransport for SpinlistClient {
    async fn upload(
        &self,
        file: &UploadFile,
        progress: ProgressCallback,
    ) -> spinlist_core::Result<UploadedMedia> {
        Ok(self.media_host()?.upload_file(file, progress).await?)
    }
}

#[async_trait]
impl TrackRegistrar for SpinlistClient {
    async fn register(
        &self,
        registration: &TrackRegistration,
    ) -> spinlist_core::Result<RegistrationResponse> {
        Ok(self.registration().register(registration).await?)
    }
}

/// Validate an http(s) URL and strip the trailing slash.
fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ServerClientError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ServerClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
