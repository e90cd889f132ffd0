//! Spinlist Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for
//! Spinlist.
//!
//! This crate provides the building blocks shared by the playback library, the
//! HTTP client and the command line application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `PlaybackSession`, `UploadFile`, `UploadedMedia`
//! - **Collaborator Traits**: `TrackRepository`, `UploadTransport`, `TrackRegistrar`
//! - **Error Handling**: Unified `SpinlistError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use spinlist_core::types::{Track, TrackId};
//!
//! let tracks = vec![
//!     Track::new("a1", "first.mp3", "https://cdn.example.com/first.mp3"),
//!     Track::new("b2", "second.mp3", "https://cdn.example.com/second.mp3"),
//! ];
//!
//! // The backend lists oldest first; the playlist shows newest first.
//! let shown = Track::newest_first(tracks);
//! assert_eq!(shown[0].id, TrackId::new("b2"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SpinlistError};
pub use traits::{ProgressCallback, TrackRegistrar, TrackRepository, UploadTransport};

pub use types::{
    PlaybackSession, RegistrationResponse, Track, TrackId, TrackRegistration, UploadFile,
    UploadProgress, UploadedMedia,
};
