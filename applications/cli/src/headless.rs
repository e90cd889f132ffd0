//! Media handle for terminals
//!
//! There is no audio output on the command line. The handle keeps the
//! position and play state so the controller's transitions can be observed
//! and persisted.

use spinlist_playback::{MediaEventKind, MediaHandle, Result};
use tracing::debug;

#[derive(Debug, Default)]
pub struct HeadlessMediaHandle {
    index: usize,
    position_secs: f64,
    playing: bool,
    observed: Vec<MediaEventKind>,
}

impl HeadlessMediaHandle {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Signals currently forwarded to the controller
    pub fn observed(&self) -> &[MediaEventKind] {
        &self.observed
    }
}

impl MediaHandle for HeadlessMediaHandle {
    fn play(&mut self) -> Result<()> {
        debug!(index = self.index, position = self.position_secs, "play");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position_secs: f64) -> Result<()> {
        self.position_secs = position_secs;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.position_secs
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn observe(&mut self, kinds: &[MediaEventKind]) {
        for kind in kinds {
            if !self.observed.contains(kind) {
                self.observed.push(*kind);
            }
        }
    }

    fn unobserve(&mut self) {
        self.observed.clear();
    }
}
