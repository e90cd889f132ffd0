//! Collaborator traits for Spinlist
//!
//! The playback core never talks to the network. These traits describe the
//! three remote collaborators so the application can swap the HTTP
//! implementations for fakes.

use crate::error::Result;
use crate::types::{
    RegistrationResponse, Track, TrackRegistration, UploadFile, UploadProgress, UploadedMedia,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Callback invoked by an upload transport as bytes are sent
///
/// Shared and `'static` so transports can move it into a streaming body.
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Source of the playlist
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// List all tracks in insertion order (oldest first)
    async fn list_tracks(&self) -> Result<Vec<Track>>;
}

/// Media host that stores uploaded audio
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Upload a file, reporting `(bytes_loaded, bytes_total)` zero or more
    /// times before resolving
    ///
    /// # Errors
    /// Returns an error if the transfer fails or the host rejects the file
    async fn upload(&self, file: &UploadFile, progress: ProgressCallback)
        -> Result<UploadedMedia>;
}

/// Backend that records uploaded tracks in the playlist
#[async_trait]
pub trait TrackRegistrar: Send + Sync {
    /// Register an uploaded file
    ///
    /// A response with `success == false` is not an error; the caller decides.
    async fn register(&self, registration: &TrackRegistration) -> Result<RegistrationResponse>;
}

#[async_trait]
impl<T: TrackRepository + ?Sized> TrackRepository for Arc<T> {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        (**self).list_tracks().await
    }
}

#[async_trait]
impl<T: UploadTransport + ?Sized> UploadTransport for Arc<T> {
    async fn upload(
        &self,
        file: &UploadFile,
        progress: ProgressCallback,
    ) -> Result<UploadedMedia> {
        (**self).upload(file, progress).await
    }
}

#[async_trait]
impl<T: TrackRegistrar + ?Sized> TrackRegistrar for Arc<T> {
    async fn register(&self, registration: &TrackRegistration) -> Result<RegistrationResponse> {
        (**self).register(registration).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedRepository(Vec<Track>);

    #[async_trait]
    impl TrackRepository for FixedRepository {
        async fn list_tracks(&self) -> Result<Vec<Track>> {
            Ok(self.0.clone())
        }
    }

    struct ChunkedTransport;

    #[async_trait]
    impl UploadTransport for ChunkedTransport {
        async fn upload(
            &self,
            file: &UploadFile,
            progress: ProgressCallback,
        ) -> Result<UploadedMedia> {
            let total = file.len();
            progress(UploadProgress {
                bytes_loaded: total / 2,
                bytes_total: total,
            });
            progress(UploadProgress {
                bytes_loaded: total,
                bytes_total: total,
            });
            Ok(UploadedMedia {
                secure_url: format!("https://cdn.example.com/{}", file.file_name),
                public_id: "pid".into(),
            })
        }
    }

    #[tokio::test]
    async fn repository_through_arc() {
        let repo: Arc<dyn TrackRepository> =
            Arc::new(FixedRepository(vec![Track::new("1", "a.mp3", "u")]));
        let tracks = repo.list_tracks().await.unwrap();
        assert_eq!(tracks.len(), 1);
    }

    #[tokio::test]
    async fn transport_reports_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));

        let file = UploadFile::new("a.mp3", vec![0u8; 10]);
        let media = ChunkedTransport.upload(&file, callback).await.unwrap();

        assert_eq!(media.secure_url, "https://cdn.example.com/a.mp3");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].bytes_loaded, 10);
    }
}
