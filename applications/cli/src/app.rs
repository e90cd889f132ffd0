//! Player application
//!
//! Wires the playback controller and upload tracker to the remote
//! collaborators. One `PlayerApp` corresponds to one page load.

use crate::error::Result;
use crate::headless::HeadlessMediaHandle;
use spinlist_core::{
    ProgressCallback, SpinlistError, Track, TrackRegistrar, TrackRegistration, TrackRepository,
    UploadFile, UploadTransport, UploadedMedia,
};
use spinlist_playback::{PlaybackController, PlaybackEvent, UploadTracker};
use spinlist_storage::SessionStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Remote services the player talks to
#[derive(Clone)]
pub struct Collaborators {
    pub repository: Arc<dyn TrackRepository>,
    pub transport: Arc<dyn UploadTransport>,
    pub registrar: Arc<dyn TrackRegistrar>,
}

impl Collaborators {
    /// Use one value for all three roles
    pub fn from_client<C>(client: Arc<C>) -> Self
    where
        C: TrackRepository + UploadTransport + TrackRegistrar + 'static,
    {
        Self {
            repository: client.clone(),
            transport: client.clone(),
            registrar: client,
        }
    }
}

pub struct PlayerApp {
    remote: Collaborators,
    controller: PlaybackController,
    tracker: UploadTracker,
}

impl PlayerApp {
    /// Restore the session from `store`; nothing plays until `select`
    pub fn new(remote: Collaborators, store: SessionStore) -> Self {
        Self {
            remote,
            controller: PlaybackController::new(store),
            tracker: UploadTracker::new(),
        }
    }

    /// Fetch the track list, reconcile the session and re-render handles
    pub async fn refresh(&mut self) -> Result<&[Track]> {
        let tracks = Track::newest_first(self.remote.repository.list_tracks().await?);
        info!(tracks = tracks.len(), "Track list loaded");

        let count = tracks.len();
        self.controller.set_tracks(tracks)?;

        let handles = self.controller.handles_mut();
        handles.clear();
        for index in 0..count {
            handles.insert(index, Box::new(HeadlessMediaHandle::new(index)));
        }

        Ok(self.controller.tracks())
    }

    /// Select a track and return the resulting events
    pub fn select(&mut self, index: usize) -> Result<Vec<PlaybackEvent>> {
        self.controller.select(index)?;
        Ok(self.controller.drain_events())
    }

    /// Feed a position report for the track at `index`
    pub fn report_position(&mut self, index: usize, offset_secs: f64) -> Result<()> {
        self.controller.on_position_tick(index, offset_secs)?;
        Ok(())
    }

    /// Feed a completion signal for the track at `index`
    pub fn complete(&mut self, index: usize) -> Result<Vec<PlaybackEvent>> {
        self.controller.on_completion(index)?;
        Ok(self.controller.drain_events())
    }

    /// Upload `file`, register it and refresh the list
    ///
    /// `on_progress` is called each time the displayed percentage changes.
    /// The job is marked `Failed` on any error and `Succeeded` only once the
    /// backend acknowledged the registration. Either way the tracker returns
    /// to idle once the outcome has been reported.
    pub async fn upload(
        &mut self,
        file: UploadFile,
        mut on_progress: impl FnMut(u8),
    ) -> Result<UploadedMedia> {
        self.tracker.begin(&file)?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let progress: ProgressCallback = Arc::new(move |p| {
            // Receiver outlives the transfer
            let _ = tx.send(p);
        });

        let transport = Arc::clone(&self.remote.transport);
        let transfer = transport.upload(&file, progress);
        tokio::pin!(transfer);

        let result = loop {
            tokio::select! {
                biased;
                Some(p) = rx.recv() => {
                    if let Some(percent) = self.tracker.report_progress(p.bytes_loaded, p.bytes_total) {
                        on_progress(percent);
                    }
                }
                result = &mut transfer => break result,
            }
        };

        while let Ok(p) = rx.try_recv() {
            if let Some(percent) = self.tracker.report_progress(p.bytes_loaded, p.bytes_total) {
                on_progress(percent);
            }
        }

        let media = match result {
            Ok(media) => media,
            Err(e) => return self.fail_upload(&file, e),
        };

        let registration = TrackRegistration::for_upload(&media, file.file_name.clone());
        match self.remote.registrar.register(&registration).await {
            Ok(ack) if ack.success => {}
            Ok(_) => {
                return self.fail_upload(
                    &file,
                    SpinlistError::RegistrationRejected(file.file_name.clone()),
                )
            }
            Err(e) => return self.fail_upload(&file, e),
        }

        let reported = self.tracker.percent();
        self.tracker.complete(true)?;
        if self.tracker.percent() != reported {
            on_progress(self.tracker.percent());
        }
        self.tracker.reset();

        self.refresh().await?;
        Ok(media)
    }

    fn fail_upload<T>(&mut self, file: &UploadFile, error: SpinlistError) -> Result<T> {
        warn!(file = %file.file_name, error = %error, "Upload failed");
        self.tracker.complete(false)?;
        self.tracker.reset();
        Err(error.into())
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn tracker(&self) -> &UploadTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use async_trait::async_trait;
    use spinlist_core::{RegistrationResponse, UploadProgress};
    use spinlist_playback::UploadStatus;
    use spinlist_storage::{MemoryStore, SessionStore};
    use std::sync::Mutex;

    /// In-process backend: registrations land in the listing
    #[derive(Default)]
    struct FakeBackend {
        tracks: Mutex<Vec<Track>>,
        decline: bool,
        fail_transfer: bool,
    }

    impl FakeBackend {
        fn with_tracks(ids: &[&str]) -> Self {
            let tracks = ids
                .iter()
                .map(|id| Track::new(*id, format!("{id}.mp3"), format!("https://cdn.test/{id}")))
                .collect();
            Self {
                tracks: Mutex::new(tracks),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl TrackRepository for FakeBackend {
        async fn list_tracks(&self) -> spinlist_core::Result<Vec<Track>> {
            Ok(self.tracks.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl UploadTransport for FakeBackend {
        async fn upload(
            &self,
            file: &UploadFile,
            progress: ProgressCallback,
        ) -> spinlist_core::Result<UploadedMedia> {
            let total = file.len();
            for loaded in [total / 4, total / 2, total / 2, total] {
                progress(UploadProgress {
                    bytes_loaded: loaded,
                    bytes_total: total,
                });
                tokio::task::yield_now().await;
            }
            if self.fail_transfer {
                return Err(SpinlistError::network("connection reset"));
            }
            Ok(UploadedMedia {
                secure_url: format!("https://cdn.test/{}", file.file_name),
                public_id: file.file_name.clone(),
            })
        }
    }

    #[async_trait]
    impl TrackRegistrar for FakeBackend {
        async fn register(
            &self,
            registration: &TrackRegistration,
        ) -> spinlist_core::Result<RegistrationResponse> {
            if self.decline {
                return Ok(RegistrationResponse { success: false });
            }
            self.tracks.lock().unwrap().push(Track::new(
                registration.public_id.clone(),
                registration.file_name.clone(),
                registration.audio_url.clone(),
            ));
            Ok(RegistrationResponse { success: true })
        }
    }

    fn app(backend: FakeBackend) -> PlayerApp {
        PlayerApp::new(
            Collaborators::from_client(Arc::new(backend)),
            SessionStore::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn refresh_lists_newest_first() {
        let mut app = app(FakeBackend::with_tracks(&["old", "new"]));

        let tracks = app.refresh().await.unwrap();

        assert_eq!(tracks[0].id.as_str(), "new");
        assert_eq!(app.controller().handles().len(), 2);
    }

    #[tokio::test]
    async fn upload_reports_progress_and_keeps_current_track() {
        let mut app = app(FakeBackend::with_tracks(&["a", "b"]));
        app.refresh().await.unwrap();
        // Newest first: [b, a]; select "a"
        app.select(1).unwrap();

        let mut seen = Vec::new();
        let file = UploadFile::new("c.mp3", vec![0u8; 400]);
        app.upload(file, |p| seen.push(p)).await.unwrap();

        assert_eq!(seen, vec![25, 50, 100]);
        assert_eq!(app.tracker().status(), UploadStatus::Idle);
        assert!(app.tracker().job().is_none());
        assert_eq!(app.controller().tracks()[0].file_name, "c.mp3");
        assert_eq!(app.controller().session().current_index, Some(2));
        assert_eq!(app.controller().current_track().unwrap().id.as_str(), "a");
    }

    #[tokio::test]
    async fn upload_transfer_failure_returns_tracker_to_idle() {
        let mut app = app(FakeBackend {
            fail_transfer: true,
            ..FakeBackend::with_tracks(&["a"])
        });

        let err = app
            .upload(UploadFile::new("x.mp3", vec![1u8; 8]), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Remote(SpinlistError::Network(_))));
        assert_eq!(app.tracker().status(), UploadStatus::Idle);
        assert_eq!(app.tracker().percent(), 0);
    }

    #[tokio::test]
    async fn upload_after_success_starts_fresh_job() {
        let mut app = app(FakeBackend::with_tracks(&[]));

        app.upload(UploadFile::new("one.mp3", vec![0u8; 400]), |_| {})
            .await
            .unwrap();
        let mut seen = Vec::new();
        app.upload(UploadFile::new("two.mp3", vec![0u8; 400]), |p| seen.push(p))
            .await
            .unwrap();

        assert_eq!(seen, vec![25, 50, 100]);
        assert_eq!(app.controller().tracks().len(), 2);
        assert_eq!(app.tracker().status(), UploadStatus::Idle);
    }

    #[tokio::test]
    async fn declined_registration_returns_tracker_to_idle() {
        let mut app = app(FakeBackend {
            decline: true,
            ..FakeBackend::with_tracks(&["a"])
        });

        let err = app
            .upload(UploadFile::new("x.mp3", vec![1u8; 8]), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::Remote(SpinlistError::RegistrationRejected(_))
        ));
        assert_eq!(app.tracker().status(), UploadStatus::Idle);
        assert!(!app.tracker().is_busy());
    }

    #[tokio::test]
    async fn empty_upload_rejected_before_transfer() {
        let mut app = app(FakeBackend::with_tracks(&[]));

        let err = app
            .upload(UploadFile::new("empty.mp3", Vec::new()), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Upload(_)));
        assert_eq!(app.tracker().status(), UploadStatus::Idle);
    }

    #[tokio::test]
    async fn completion_walks_to_the_end() {
        let mut app = app(FakeBackend::with_tracks(&["a", "b"]));
        app.refresh().await.unwrap();
        app.select(0).unwrap();
        app.report_position(0, 9.0).unwrap();

        let events = app.complete(0).unwrap();
        assert_eq!(events[0].current_index(), Some(1));

        let events = app.complete(1).unwrap();
        assert_eq!(events, vec![PlaybackEvent::PlaylistEnded { last_index: 1 }]);
    }
}
