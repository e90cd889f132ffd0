//! Types for the Spinlist HTTP clients.

/// Upload preset sent when none is configured.
pub const DEFAULT_UPLOAD_PRESET: &str = "my-preset";

/// Configuration for reaching the backend and the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub api_url: String,
    /// Media host upload endpoint (uploads are unavailable when unset)
    pub upload_url: Option<String>,
    /// Unsigned upload preset passed to the media host
    pub upload_preset: String,
}

impl ServerConfig {
    /// Create a config for listing and registration only.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            upload_url: None,
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
        }
    }

    /// Add the media host upload endpoint.
    #[must_use]
    pub fn with_media_host(
        mut self,
        upload_url: impl Into<String>,
        upload_preset: impl Into<String>,
    ) -> Self {
        self.upload_url = Some(upload_url.into());
        self.upload_preset = upload_preset.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_media_host() {
        let config = ServerConfig::new("http://localhost:5000");
        assert!(config.upload_url.is_none());
        assert_eq!(config.upload_preset, DEFAULT_UPLOAD_PRESET);
    }

    #[test]
    fn test_with_media_host() {
        let config = ServerConfig::new("http://localhost:5000")
            .with_media_host("https://media.example/upload", "tracks");

        assert_eq!(config.upload_url.as_deref(), Some("https://media.example/upload"));
        assert_eq!(config.upload_preset, "tracks");
    }
}
