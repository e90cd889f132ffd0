//! Audio upload to the media host.

use crate::error::{Result, ServerClientError};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use spinlist_core::{ProgressCallback, UploadFile, UploadProgress, UploadedMedia};
use std::time::Duration;
use tracing::{debug, info};

/// Size of each streamed body chunk; progress is reported once per chunk.
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Upload client for the media host.
pub struct UploadClient<'a> {
    http: &'a Client,
    upload_url: &'a str,
    upload_preset: &'a str,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, upload_url: &'a str, upload_preset: &'a str) -> Self {
        Self {
            http,
            upload_url,
            upload_preset,
        }
    }

    /// Upload a single audio file.
    ///
    /// The multipart form carries the file and the upload preset. The body is
    /// streamed in chunks and `progress` is called with the running byte count
    /// as each chunk is handed to the connection.
    ///
    /// # Returns
    /// The durable URL and media host identifier of the stored file.
    pub async fn upload_file(
        &self,
        file: &UploadFile,
        progress: ProgressCallback,
    ) -> Result<UploadedMedia> {
        let bytes_total = file.len();
        debug!(file = %file.file_name, size = bytes_total, "Uploading to media host");

        let body = Body::wrap_stream(progress_stream(file.bytes.clone(), progress));
        let file_part = Part::stream_with_length(body, bytes_total)
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())?;

        let form = Form::new()
            .part("file", file_part)
            .text("upload_preset", self.upload_preset.to_string());

        let response = self
            .http
            .post(self.upload_url)
            .timeout(UPLOAD_TIMEOUT)
            .multipart(form)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        if !response.status().is_success() {
            return Err(ServerClientError::from_response(response).await);
        }

        let media: UploadedMedia = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse upload response: {}", e))
        })?;

        info!(
            file = %file.file_name,
            public_id = %media.public_id,
            size = bytes_total,
            "Uploaded to media host"
        );

        Ok(media)
    }
}

/// Split `bytes` into chunks, reporting progress as each one is pulled.
fn progress_stream(
    bytes: Bytes,
    progress: ProgressCallback,
) -> impl futures_util::Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static {
    let bytes_total = bytes.len() as u64;
    let chunks: Vec<Bytes> = (0..bytes.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| bytes.slice(start..(start + UPLOAD_CHUNK_SIZE).min(bytes.len())))
        .collect();

    let mut bytes_loaded = 0u64;
    futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
        bytes_loaded += chunk.len() as u64;
        progress(UploadProgress {
            bytes_loaded,
            bytes_total,
        });
        Ok(chunk)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_progress_reported_per_chunk() {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reports);
        let progress: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));

        let data = Bytes::from(vec![1u8; UPLOAD_CHUNK_SIZE * 2 + 10]);
        let chunks: Vec<_> = progress_stream(data, progress).collect().await;

        assert_eq!(chunks.len(), 3);
        let reports = reports.lock().unwrap();
        let loaded: Vec<u64> = reports.iter().map(|p| p.bytes_loaded).collect();
        let chunk = UPLOAD_CHUNK_SIZE as u64;
        assert_eq!(loaded, vec![chunk, chunk * 2, chunk * 2 + 10]);
        assert!(reports.iter().all(|p| p.bytes_total == chunk * 2 + 10));
    }

    #[tokio::test]
    async fn test_empty_body_reports_nothing() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let progress: ProgressCallback = Arc::new(move |_| *counter.lock().unwrap() += 1);

        let chunks: Vec<_> = progress_stream(Bytes::new(), progress).collect().await;

        assert!(chunks.is_empty());
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
