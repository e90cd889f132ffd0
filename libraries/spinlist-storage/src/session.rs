//! Playback session persistence
//!
//! Two slots hold the session: the current track index and the playback
//! offset within it. Both are stored as decimal strings so a browser
//! `localStorage` written by an earlier version of the page reads back
//! unchanged.

use crate::error::Result;
use crate::kv::KeyValueStore;
use spinlist_core::PlaybackSession;
use tracing::{debug, warn};

/// Key holding the current track index
pub const CURRENT_AUDIO_INDEX: &str = "currentAudioIndex";

/// Key holding the playback offset in seconds
pub const CURRENT_PLAYBACK_POSITION: &str = "currentPlaybackPosition";

/// Typed adapter over a [`KeyValueStore`] for the playback session
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl SessionStore {
    /// Wrap a key/value backend
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Read the persisted session
    ///
    /// Missing slots mean "no selection" and offset `0`. Slots that do not
    /// parse are treated as missing.
    pub fn load(&self) -> Result<PlaybackSession> {
        let current_index = self
            .store
            .get(CURRENT_AUDIO_INDEX)?
            .and_then(|raw| parse_index(&raw));

        let current_offset_secs = self
            .store
            .get(CURRENT_PLAYBACK_POSITION)?
            .and_then(|raw| parse_offset(&raw))
            .unwrap_or(0.0);

        debug!(?current_index, current_offset_secs, "Loaded playback session");

        Ok(PlaybackSession {
            current_index,
            current_offset_secs,
        })
    }

    /// Persist the current index (`None` removes the slot)
    pub fn save_index(&mut self, index: Option<usize>) -> Result<()> {
        match index {
            Some(index) => self.store.set(CURRENT_AUDIO_INDEX, &index.to_string()),
            None => self.store.remove(CURRENT_AUDIO_INDEX),
        }
    }

    /// Persist the playback offset
    pub fn save_offset(&mut self, offset_secs: f64) -> Result<()> {
        self.store
            .set(CURRENT_PLAYBACK_POSITION, &offset_secs.to_string())
    }

    /// Discard the persisted offset
    pub fn clear_offset(&mut self) -> Result<()> {
        self.store.remove(CURRENT_PLAYBACK_POSITION)
    }

    /// Persist a whole session
    pub fn save(&mut self, session: &PlaybackSession) -> Result<()> {
        self.save_index(session.current_index)?;
        if session.current_offset_secs > 0.0 {
            self.save_offset(session.current_offset_secs)
        } else {
            self.clear_offset()
        }
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) => {
            warn!(value = raw, "Ignoring unreadable {}", CURRENT_AUDIO_INDEX);
            None
        }
    }
}

fn parse_offset(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(offset) if offset.is_finite() && offset >= 0.0 => Some(offset),
        _ => {
            warn!(value = raw, "Ignoring unreadable {}", CURRENT_PLAYBACK_POSITION);
            None
        }
    }
}
