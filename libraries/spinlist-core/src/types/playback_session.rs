/// Playback session shared between the controller and its persistence
use serde::{Deserialize, Serialize};

/// Which track is current and how far into it playback has progressed
///
/// One instance per page load (or process run). Restored from the persistence
/// store on construction, mutated only by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Index into the displayed track list, if a track is current
    pub current_index: Option<usize>,

    /// Resume point within the current track, in seconds
    pub current_offset_secs: f64,
}

impl PlaybackSession {
    /// Session with no current track
    pub fn new() -> Self {
        Self::default()
    }

    /// Session restored for a track
    pub fn at(index: usize, offset_secs: f64) -> Self {
        Self {
            current_index: Some(index),
            current_offset_secs: offset_secs,
        }
    }

    /// Whether `index` is the current track
    pub fn is_current(&self, index: usize) -> bool {
        self.current_index == Some(index)
    }

    /// Forget the current track and its resume point
    pub fn clear(&mut self) {
        self.current_index = None;
        self.current_offset_secs = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_has_no_track() {
        let session = PlaybackSession::new();
        assert_eq!(session.current_index, None);
        assert_eq!(session.current_offset_secs, 0.0);
        assert!(!session.is_current(0));
    }

    #[test]
    fn clear_resets_offset() {
        let mut session = PlaybackSession::at(2, 31.5);
        assert!(session.is_current(2));

        session.clear();
        assert_eq!(session, PlaybackSession::new());
    }
}
