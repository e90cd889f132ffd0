//! Playback controller - session state machine
//!
//! Owns the single-current-track invariant: decides which track is current,
//! drives the media handles, persists the index and position, and advances on
//! completion.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    media::MediaHandleSet,
    types::{MediaEvent, MediaEventKind, PlaybackState},
};
use spinlist_core::{PlaybackSession, Track};
use spinlist_storage::SessionStore;
use tracing::{debug, info, trace, warn};

/// Signals subscribed on the current track's handle
const OBSERVED_EVENTS: [MediaEventKind; 2] = [MediaEventKind::Ended, MediaEventKind::TimeUpdate];

/// Playback controller
///
/// One per page load. The session is restored from the store on construction
/// but playback never starts on its own: resume happens the next time the
/// restored index is selected.
///
/// Events from media handles are honored only for the current index. Every
/// other index is stale and ignored, so a late `TimeUpdate` from a paused
/// track cannot overwrite the new track's offset.
pub struct PlaybackController {
    session: PlaybackSession,
    store: SessionStore,
    tracks: Vec<Track>,
    tracks_loaded: bool,
    handles: MediaHandleSet,
    state: PlaybackState,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller, restoring the session from `store`
    ///
    /// A store that cannot be read is treated like an empty one.
    pub fn new(store: SessionStore) -> Self {
        let session = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read persisted session, starting fresh");
            PlaybackSession::new()
        });

        Self {
            session,
            store,
            tracks: Vec::new(),
            tracks_loaded: false,
            handles: MediaHandleSet::new(),
            state: PlaybackState::Idle,
            pending_events: Vec::new(),
        }
    }

    // ===== Track list =====

    /// Replace the track list and reconcile the session against it
    ///
    /// If the current track is still listed, the current index follows it to
    /// its new position. On the first load only the index is known, so it is
    /// kept when in range. Otherwise the session is reset to no selection.
    ///
    /// When the current index moves or is cleared, playback stops and the state
    /// returns to idle; the next `select` of the new index resumes from the
    /// kept offset. Handles are keyed by index; the rendering layer
    /// re-registers them after a refresh.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) -> Result<()> {
        let previous_index = self.session.current_index;

        let current_id = if self.tracks_loaded {
            previous_index
                .and_then(|i| self.tracks.get(i))
                .map(|t| t.id.clone())
        } else {
            None
        };

        let reconciled = match current_id {
            Some(id) => tracks.iter().position(|t| t.id == id),
            None => previous_index.filter(|&i| i < tracks.len()),
        };

        debug!(
            tracks = tracks.len(),
            ?previous_index,
            ?reconciled,
            "Track list replaced"
        );

        self.tracks = tracks;
        self.tracks_loaded = true;

        if reconciled == previous_index {
            return Ok(());
        }

        self.pending_events.push(PlaybackEvent::SessionReconciled {
            previous_index,
            current_index: reconciled,
        });

        // Handles are keyed by the old positions, so whatever is playing no
        // longer matches the current index.
        self.stop_all_handles();

        match reconciled {
            Some(index) => {
                self.session.current_index = Some(index);
                self.store.save_index(Some(index))?;
            }
            None => {
                info!(?previous_index, "Current track no longer listed, clearing session");
                self.session.clear();
                self.store.save(&self.session)?;
            }
        }

        Ok(())
    }

    fn stop_all_handles(&mut self) {
        for (_, handle) in self.handles.iter_mut() {
            handle.unobserve();
            handle.pause();
        }
        self.state = PlaybackState::Idle;
    }

    // ===== Playback Control =====

    /// Make the track at `index` current and play it
    ///
    /// Once the selected handle is playing, every other handle is paused and
    /// stops forwarding events. If the handle refuses to seek or play, the
    /// previous track keeps playing and the session is untouched. The selected
    /// handle resumes from the persisted offset when `index` is already the
    /// session's current index, and starts from zero otherwise (discarding the
    /// previous track's resume point).
    ///
    /// Persistence failures are reported after the transition completed.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.select_track(index, false)
    }

    fn select_track(&mut self, index: usize, auto_advanced: bool) -> Result<()> {
        let track_id = self
            .tracks
            .get(index)
            .map(|t| t.id.clone())
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        if !self.handles.contains(index) {
            return Err(PlaybackError::NoMediaHandle(index));
        }

        let resume = self.session.is_current(index);
        let start_at = if resume {
            self.session.current_offset_secs
        } else {
            0.0
        };

        let was_playing = self.state == PlaybackState::Playing(index);
        let handle = self
            .handles
            .get_mut(index)
            .ok_or(PlaybackError::NoMediaHandle(index))?;
        handle.unobserve();
        if let Err(e) = handle.seek(start_at).and_then(|()| handle.play()) {
            if was_playing {
                handle.observe(&OBSERVED_EVENTS);
            }
            warn!(index, error = %e, "Media refused selection");
            return Err(e);
        }
        handle.observe(&OBSERVED_EVENTS);

        for (i, other) in self.handles.iter_mut() {
            if i != index {
                other.unobserve();
                other.pause();
            }
        }

        let previous_index = self.session.current_index;
        self.session.current_index = Some(index);
        if !resume {
            self.session.current_offset_secs = 0.0;
        }
        self.state = PlaybackState::Playing(index);

        debug!(index, ?previous_index, start_at, auto_advanced, "Track selected");

        self.pending_events.push(PlaybackEvent::TrackSelected {
            index,
            track_id,
            resumed_from_secs: start_at,
            auto_advanced,
        });

        let saved = self.store.save_index(Some(index));
        let cleared = if resume {
            Ok(())
        } else {
            self.store.clear_offset()
        };
        saved.and(cleared).map_err(|e| {
            warn!(index, error = %e, "Failed to persist selection");
            PlaybackError::from(e)
        })
    }

    /// Record the playback position of the current track
    ///
    /// Safe at any frequency; the last call wins. Ticks for any index other
    /// than the current one are ignored.
    pub fn on_position_tick(&mut self, index: usize, offset_secs: f64) -> Result<()> {
        if !self.session.is_current(index) {
            trace!(index, offset_secs, "Ignoring stale position tick");
            return Ok(());
        }

        if !offset_secs.is_finite() || offset_secs < 0.0 {
            warn!(index, offset_secs, "Ignoring invalid playback position");
            return Ok(());
        }

        self.session.current_offset_secs = offset_secs;
        self.store.save_offset(offset_secs)?;
        Ok(())
    }

    /// Handle completion of the track at `index`
    ///
    /// Advances to `index + 1` when it exists. Past the end playback simply
    /// stops: no wraparound, and the current index stays on the last track.
    pub fn on_completion(&mut self, index: usize) -> Result<()> {
        if !self.session.is_current(index) {
            trace!(index, "Ignoring stale completion");
            return Ok(());
        }

        let next = index + 1;
        if next < self.tracks.len() {
            info!(from = index, to = next, "Auto-advancing to next track");
            return self.select_track(next, true);
        }

        info!(last_index = index, "Playlist ended");
        if let Some(handle) = self.handles.get_mut(index) {
            handle.unobserve();
        }
        self.state = PlaybackState::Ended(index);
        self.pending_events
            .push(PlaybackEvent::PlaylistEnded { last_index: index });
        Ok(())
    }

    /// Dispatch a signal forwarded from the handle at `index`
    pub fn handle_media_event(&mut self, index: usize, event: MediaEvent) -> Result<()> {
        match event {
            MediaEvent::Ended => self.on_completion(index),
            MediaEvent::TimeUpdate(offset_secs) => self.on_position_tick(index, offset_secs),
        }
    }

    // ===== State Queries =====

    /// Current session (index and resume offset)
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Controller state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Tracks in display order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Current track, if the session index points into the list
    pub fn current_track(&self) -> Option<&Track> {
        self.session.current_index.and_then(|i| self.tracks.get(i))
    }

    /// Whether the row at `index` should be highlighted
    pub fn is_current(&self, index: usize) -> bool {
        self.session.is_current(index)
    }

    /// Whether completion of the current track would auto-advance
    pub fn has_next(&self) -> bool {
        self.session
            .current_index
            .is_some_and(|i| i + 1 < self.tracks.len())
    }

    // ===== Media handles =====

    /// Rendered media handles
    pub fn handles(&self) -> &MediaHandleSet {
        &self.handles
    }

    /// Rendered media handles, for the rendering layer to (un)register
    pub fn handles_mut(&mut self) -> &mut MediaHandleSet {
        &mut self.handles
    }

    // ===== Events =====

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("tracks", &self.tracks.len())
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::DummyMediaHandle;
    use spinlist_storage::MemoryStore;

    fn create_controller(track_count: usize) -> PlaybackController {
        let mut controller = PlaybackController::new(SessionStore::new(MemoryStore::new()));
        let tracks = (0..track_count)
            .map(|i| Track::new(format!("t{i}"), format!("{i}.mp3"), format!("u{i}")))
            .collect();
        controller.set_tracks(tracks).unwrap();
        for i in 0..track_count {
            controller
                .handles_mut()
                .insert(i, Box::new(DummyMediaHandle::default()));
        }
        controller
    }

    #[test]
    fn new_controller_is_idle() {
        let controller = create_controller(3);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(controller.session().current_index, None);
        assert!(controller.current_track().is_none());
        assert!(!controller.has_next());
    }

    #[test]
    fn select_plays_only_the_selected_handle() {
        let mut controller = create_controller(3);

        controller.select(0).unwrap();
        controller.select(2).unwrap();

        assert_eq!(controller.handles().playing(), vec![2]);
        assert_eq!(controller.state(), PlaybackState::Playing(2));
        assert!(controller.is_current(2));
        assert!(!controller.is_current(0));
    }

    #[test]
    fn select_out_of_range_rejected() {
        let mut controller = create_controller(2);

        let err = controller.select(5).unwrap_err();
        assert!(matches!(err, PlaybackError::IndexOutOfBounds(5)));
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn select_without_handle_rejected() {
        let mut controller = create_controller(2);
        controller.handles_mut().remove(1);

        let err = controller.select(1).unwrap_err();
        assert!(matches!(err, PlaybackError::NoMediaHandle(1)));
        assert_eq!(controller.session().current_index, None);
    }

    #[test]
    fn media_events_dispatch() {
        let mut controller = create_controller(2);
        controller.select(0).unwrap();

        controller
            .handle_media_event(0, MediaEvent::TimeUpdate(3.0))
            .unwrap();
        assert_eq!(controller.session().current_offset_secs, 3.0);

        controller.handle_media_event(0, MediaEvent::Ended).unwrap();
        assert_eq!(controller.session().current_index, Some(1));
    }

    #[test]
    fn invalid_tick_ignored() {
        let mut controller = create_controller(1);
        controller.select(0).unwrap();
        controller.on_position_tick(0, 8.0).unwrap();

        controller.on_position_tick(0, f64::NAN).unwrap();
        controller.on_position_tick(0, -1.0).unwrap();

        assert_eq!(controller.session().current_offset_secs, 8.0);
    }

    #[test]
    fn events_are_drained_once() {
        let mut controller = create_controller(1);
        controller.select(0).unwrap();
        controller.on_completion(0).unwrap();

        let events = controller.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], PlaybackEvent::PlaylistEnded { last_index: 0 }));
        assert!(controller.drain_events().is_empty());
    }
}
