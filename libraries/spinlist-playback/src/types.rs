//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Controller state
///
/// Pausing non-current handles is a side effect of selection, not a state:
/// a paused track that is not current is never resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing selected since the controller was created
    #[default]
    Idle,

    /// Track at this index was selected and is playing
    Playing(usize),

    /// Track at this index completed and was the last in the list
    Ended(usize),
}

impl PlaybackState {
    /// Index the state refers to, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Playing(index) | Self::Ended(index) => Some(*index),
        }
    }
}

/// Kinds of media element signals the controller subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// Playback reached the end of the media
    Ended,

    /// Playback position changed
    TimeUpdate,
}

/// A media element signal forwarded by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback reached the end of the media
    Ended,

    /// Playback position changed (seconds from start)
    TimeUpdate(f64),
}

impl MediaEvent {
    /// Kind of this event
    pub fn kind(&self) -> MediaEventKind {
        match self {
            Self::Ended => MediaEventKind::Ended,
            Self::TimeUpdate(_) => MediaEventKind::TimeUpdate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_index() {
        assert_eq!(PlaybackState::Idle.index(), None);
        assert_eq!(PlaybackState::Playing(3).index(), Some(3));
        assert_eq!(PlaybackState::Ended(2).index(), Some(2));
    }

    #[test]
    fn event_kinds() {
        assert_eq!(MediaEvent::Ended.kind(), MediaEventKind::Ended);
        assert_eq!(MediaEvent::TimeUpdate(1.5).kind(), MediaEventKind::TimeUpdate);
    }
}
