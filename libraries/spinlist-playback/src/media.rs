//! Platform-agnostic media handle trait
//!
//! Abstracts the media element behind each rendered track (an HTML audio
//! element in a browser, a headless stand-in on the command line).

use crate::error::Result;
use crate::types::MediaEventKind;
use std::collections::BTreeMap;

/// Controllable media element for one rendered track
///
/// Implementors are created and destroyed by the rendering layer. The
/// controller only drives them.
pub trait MediaHandle {
    /// Start playback from the current position
    ///
    /// # Returns
    /// * `Err(_)` - The element refused to play (autoplay policy, missing source, ...)
    fn play(&mut self) -> Result<()>;

    /// Pause playback (no-op when already paused)
    fn pause(&mut self);

    /// Move the playback position
    ///
    /// # Arguments
    /// * `position_secs` - Target position from start of media
    fn seek(&mut self, position_secs: f64) -> Result<()>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Whether the element is currently playing
    fn is_playing(&self) -> bool;

    /// Start forwarding the given signals for this handle to the controller
    ///
    /// Calling again with the same kinds must not register duplicates.
    fn observe(&mut self, kinds: &[MediaEventKind]);

    /// Stop forwarding all signals for this handle
    fn unobserve(&mut self);
}

/// Media handles for the currently rendered tracks, keyed by track index
#[derive(Default)]
pub struct MediaHandleSet {
    handles: BTreeMap<usize, Box<dyn MediaHandle>>,
}

impl MediaHandleSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handle rendered for `index`, returning any handle it replaces
    pub fn insert(
        &mut self,
        index: usize,
        handle: Box<dyn MediaHandle>,
    ) -> Option<Box<dyn MediaHandle>> {
        self.handles.insert(index, handle)
    }

    /// Unregister the handle for `index`
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn MediaHandle>> {
        self.handles.remove(&index)
    }

    /// Drop every handle (list re-render)
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Whether a handle is rendered for `index`
    pub fn contains(&self, index: usize) -> bool {
        self.handles.contains_key(&index)
    }

    /// Handle for `index`
    pub fn get(&self, index: usize) -> Option<&dyn MediaHandle> {
        self.handles.get(&index).map(|h| &**h)
    }

    /// Mutable handle for `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn MediaHandle + 'static)> {
        self.handles.get_mut(&index).map(|h| &mut **h)
    }

    /// Iterate handles in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &dyn MediaHandle)> {
        self.handles.iter().map(|(i, h)| (*i, &**h))
    }

    /// Iterate handles mutably in index order
    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (usize, &mut (dyn MediaHandle + 'static))> {
        self.handles.iter_mut().map(|(i, h)| (*i, &mut **h))
    }

    /// Indices of handles that report playing
    pub fn playing(&self) -> Vec<usize> {
        self.iter()
            .filter(|(_, h)| h.is_playing())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of rendered handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handles are rendered
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl std::fmt::Debug for MediaHandleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaHandleSet")
            .field("indices", &self.handles.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Dummy media handle for testing
#[cfg(test)]
#[derive(Debug, Default)]
pub struct DummyMediaHandle {
    pub position: f64,
    pub playing: bool,
    pub observed: Vec<MediaEventKind>,
}

#[cfg(test)]
impl MediaHandle for DummyMediaHandle {
    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position_secs: f64) -> Result<()> {
        self.position = position_secs;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.position
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
