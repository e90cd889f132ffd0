//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as transitions happen; the rendering layer drains them after each
//! call.

use serde::{Deserialize, Serialize};
use spinlist_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A track became current (user selection or auto-advance)
    TrackSelected {
        /// Index of the new current track
        index: usize,
        /// ID of the new current track
        track_id: TrackId,
        /// Position playback started from (0 unless resuming)
        resumed_from_secs: f64,
        /// Whether this selection came from completion of the previous track
        auto_advanced: bool,
    },

    /// The last track completed; playback stops without wrapping
    PlaylistEnded {
        /// Index of the track that completed
        last_index: usize,
    },

    /// Track list refresh moved or cleared the current index
    SessionReconciled {
        /// Index before the refresh
        previous_index: Option<usize>,
        /// Index after the refresh
        current_index: Option<usize>,
    },
}

impl PlaybackEvent {
    /// Index of the current track after this event, if it names one
    pub fn current_index(&self) -> Option<usize> {
        match self {
            Self::TrackSelected { index, .. } => Some(*index),
            Self::PlaylistEnded { last_index } => Some(*last_index),
            Self::SessionReconciled { current_index, .. } => *current_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_index_of_events() {
        let selected = PlaybackEvent::TrackSelected {
            index: 1,
            track_id: TrackId::new("b"),
            resumed_from_secs: 0.0,
            auto_advanced: false,
        };
        assert_eq!(selected.current_index(), Some(1));

        let cleared = PlaybackEvent::SessionReconciled {
            previous_index: Some(4),
            current_index: None,
        };
        assert_eq!(cleared.current_index(), None);
    }
}
