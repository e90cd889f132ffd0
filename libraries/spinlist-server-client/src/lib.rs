//! Spinlist Server Client
//!
//! HTTP client library for the services behind a Spinlist playlist.
//!
//! # Features
//!
//! - **Library**: Fetch the registered tracks (`GET /api/get-all-audios`)
//! - **Upload**: Stream an audio file to the media host with progress reporting
//! - **Registration**: Record an uploaded file with the backend (`POST /api/upload-audio`)
//!
//! [`SpinlistClient`] implements `TrackRepository`, `UploadTransport` and
//! `TrackRegistrar` from `spinlist-core`.
//!
//! # Example
//!
//! ```ignore
//! use spinlist_core::{Track, TrackRegistration, UploadFile};
//! use spinlist_server_client::{ServerConfig, SpinlistClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("http://localhost:5000")
//!         .with_media_host("https://api.media.example/v1/upload", "my-preset");
//!     let client = SpinlistClient::new(config)?;
//!
//!     // Upload, then register
//!     let file = UploadFile::new("song.mp3", std::fs::read("song.mp3")?);
//!     let media = client
//!         .media_host()?
//!         .upload_file(&file, Arc::new(|p| println!("{}/{}", p.bytes_loaded, p.bytes_total)))
//!         .await?;
//!     client
//!         .registration()
//!         .register(&TrackRegistration::for_upload(&media, &file.file_name))
//!         .await?;
//!
//!     // Newest upload first
//!     let tracks = Track::newest_first(client.library().list_tracks().await?);
//!     println!("Found {} tracks", tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod library;
mod registration;
mod types;
mod upload;

// Re-export main types
pub use client::SpinlistClient;
pub use error::{Result, ServerClientError};
pub use types::{ServerConfig, DEFAULT_UPLOAD_PRESET};

// Re-export sub-clients for direct use if needed
pub use library::LibraryClient;
pub use registration::RegistrationClient;
pub use upload::{UploadClient, UPLOAD_CHUNK_SIZE};
