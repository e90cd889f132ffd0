/// Player configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use spinlist_server_client::{ServerConfig, DEFAULT_UPLOAD_PRESET};
use std::path::{Path, PathBuf};

/// Config file read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "spinlist.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_media_host")]
    pub media_host: MediaHostSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MediaHostSettings {
    /// Empty disables uploads
    #[serde(default)]
    pub upload_url: String,

    #[serde(default = "default_upload_preset")]
    pub upload_preset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. SPINLIST_MEDIA_HOST__UPLOAD_URL
        settings = settings.add_source(
            config::Environment::with_prefix("SPINLIST")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.api.url) {
            return Err(CliError::Config(format!(
                "api.url must be an http(s) URL, got {:?}",
                self.api.url
            )));
        }

        if !self.media_host.upload_url.is_empty() && !is_http_url(&self.media_host.upload_url) {
            return Err(CliError::Config(format!(
                "media_host.upload_url must be an http(s) URL, got {:?}",
                self.media_host.upload_url
            )));
        }

        if self.media_host.upload_preset.trim().is_empty() {
            return Err(CliError::Config(
                "media_host.upload_preset cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether the media host is configured
    pub fn uploads_enabled(&self) -> bool {
        !self.media_host.upload_url.is_empty()
    }

    /// HTTP client settings
    pub fn server_config(&self) -> ServerConfig {
        let config = ServerConfig::new(self.api.url.clone());
        if self.uploads_enabled() {
            config.with_media_host(
                self.media_host.upload_url.clone(),
                self.media_host.upload_preset.clone(),
            )
        } else {
            config
        }
    }

    /// Render as TOML, for `spinlist init-config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_api_url(),
    }
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_media_host() -> MediaHostSettings {
    MediaHostSettings {
        upload_url: String::new(),
        upload_preset: default_upload_preset(),
    }
}

fn default_upload_preset() -> String {
    DEFAULT_UPLOAD_PRESET.to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        session_path: default_session_path(),
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            media_host: default_media_host(),
            storage: default_storage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.uploads_enabled());
        assert!(config.server_config().upload_url.is_none());
    }

    #[test]
    fn test_rejects_non_http_api_url() {
        let mut config = AppConfig::default();
        config.api.url = "localhost:5000".to_string();

        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_upload_url() {
        let mut config = AppConfig::default();
        config.media_host.upload_url = "ftp://media".to_string();

        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_media_host_passed_to_client() {
        let mut config = AppConfig::default();
        config.media_host.upload_url = "https://media.example/upload".to_string();
        config.media_host.upload_preset = "tracks".to_string();

        let server = config.server_config();
        assert_eq!(server.upload_url.as_deref(), Some("https://media.example/upload"));
        assert_eq!(server.upload_preset, "tracks");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
