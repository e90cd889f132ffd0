//! Spinlist - Playback Session Management
//!
//! Platform-agnostic playlist playback for Spinlist.
//!
//! This crate provides:
//! - Single-current-track selection across rendered media handles
//! - Resume from the persisted position when the last track is re-selected
//! - Auto-advance on completion, stopping at the end of the list
//! - Session reconciliation when the track list is refreshed
//! - Upload progress tracking (one job at a time)
//!
//! # Architecture
//!
//! `spinlist-playback` knows nothing about browsers or HTTP:
//! - Media elements are reached through the [`MediaHandle`] trait
//! - The session is persisted through an injected [`SessionStore`](spinlist_storage::SessionStore)
//! - Track lists come from whoever implements `TrackRepository`
//!
//! # Example: Select and auto-advance
//!
//! ```rust
//! use spinlist_core::Track;
//! use spinlist_playback::{MediaEventKind, MediaHandle, PlaybackController, Result};
//! use spinlist_storage::{MemoryStore, SessionStore};
//!
//! #[derive(Default)]
//! struct Element {
//!     time: f64,
//!     playing: bool,
//! }
//!
//! impl MediaHandle for Element {
//!     fn play(&mut self) -> Result<()> {
//!         self.playing = true;
//!         Ok(())
//!     }
//!     fn pause(&mut self) {
//!         self.playing = false;
//!     }
//!     fn seek(&mut self, position_secs: f64) -> Result<()> {
//!         self.time = position_secs;
//!         Ok(())
//!     }
//!     fn current_time(&self) -> f64 {
//!         self.time
//!     }
//!     fn is_playing(&self) -> bool {
//!         self.playing
//!     }
//!     fn observe(&mut self, _kinds: &[MediaEventKind]) {}
//!     fn unobserve(&mut self) {}
//! }
//!
//! let mut controller = PlaybackController::new(SessionStore::new(MemoryStore::new()));
//! controller
//!     .set_tracks(vec![
//!         Track::new("a", "a.mp3", "https://cdn.example/a.mp3"),
//!         Track::new("b", "b.mp3", "https://cdn.example/b.mp3"),
//!     ])
//!     .unwrap();
//! for index in 0..2 {
//!     controller.handles_mut().insert(index, Box::new(Element::default()));
//! }
//!
//! controller.select(0).unwrap();
//! controller.on_position_tick(0, 12.0).unwrap();
//! controller.on_completion(0).unwrap();
//!
//! assert!(controller.is_current(1));
//! assert_eq!(controller.session().current_offset_secs, 0.0);
//! ```
//!
//! # Example: Upload progress
//!
//! ```rust
//! use spinlist_core::UploadFile;
//! use spinlist_playback::{UploadStatus, UploadTracker};
//!
//! let mut tracker = UploadTracker::new();
//! tracker.begin(&UploadFile::new("song.mp3", vec![0u8; 400])).unwrap();
//!
//! assert_eq!(tracker.report_progress(100, 400), Some(25));
//! assert_eq!(tracker.report_progress(100, 400), None);
//!
//! tracker.complete(true).unwrap();
//! assert_eq!(tracker.status(), UploadStatus::Succeeded);
//! assert_eq!(tracker.percent_label(), "100%");
//! ```

mod controller;
mod error;
mod events;
mod media;
pub mod types;
mod upload;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result, UploadError};
pub use events::PlaybackEvent;
pub use media::{MediaHandle, MediaHandleSet};
pub use types::{MediaEvent, MediaEventKind, PlaybackState};
pub use upload::{UploadJob, UploadStatus, UploadTracker};
