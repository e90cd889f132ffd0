//! Spinlist Storage
//!
//! Durable key/value persistence for the playback session.
//!
//! The session is two string slots, `currentAudioIndex` and
//! `currentPlaybackPosition`, that must survive a reload. This crate provides:
//! - [`KeyValueStore`]: the backend abstraction
//! - [`MemoryStore`]: shared in-memory map (tests, embedding)
//! - [`JsonFileStore`]: JSON file on disk (command line)
//! - `WebStorage`: browser `localStorage` (feature `web`)
//! - [`SessionStore`]: typed adapter reading/writing a `PlaybackSession`
//!
//! # Example
//!
//! ```rust
//! use spinlist_core::PlaybackSession;
//! use spinlist_storage::{MemoryStore, SessionStore};
//!
//! let backend = MemoryStore::new();
//! let mut sessions = SessionStore::new(backend.clone());
//!
//! sessions.save_index(Some(1)).unwrap();
//! sessions.save_offset(42.5).unwrap();
//!
//! // A fresh adapter over the same backend sees the same session
//! let restored = SessionStore::new(backend).load().unwrap();
//! assert_eq!(restored, PlaybackSession::at(1, 42.5));
//! ```

#![forbid(unsafe_code)]

mod error;
mod file;
mod kv;
pub mod session;
#[cfg(feature = "web")]
mod web;

pub use error::{Result, StorageError};
pub use file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use session::{SessionStore, CURRENT_AUDIO_INDEX, CURRENT_PLAYBACK_POSITION};
#[cfg(feature = "web")]
pub use web::WebStorage;
