//! Upload progress tracking
//!
//! One upload job at a time. The transport reports byte counts; the tracker
//! turns them into the whole-number percentage shown while the job runs.

use crate::error::UploadError;
use serde::{Deserialize, Serialize};
use spinlist_core::UploadFile;
use tracing::{debug, info, trace, warn};

/// Upload job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UploadStatus {
    /// No job started since creation or the last reset
    #[default]
    Idle,
    /// Job running; progress reports are applied
    InProgress,
    /// Transport and registration succeeded
    Succeeded,
    /// Transport or registration failed
    Failed,
}

/// The file currently (or last) being uploaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadJob {
    /// Display name of the file
    pub file_name: String,
    /// Size of the file in bytes
    pub file_size: u64,
    /// Bytes reported sent so far
    pub bytes_loaded: u64,
}

/// Upload progress tracker
#[derive(Debug, Default)]
pub struct UploadTracker {
    job: Option<UploadJob>,
    status: UploadStatus,
    percent: u8,
}

impl UploadTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an upload of `file`
    ///
    /// # Errors
    /// * `UploadError::JobAlreadyRunning` - Another job is in progress; its
    ///   progress is left untouched
    /// * `UploadError::EmptyFile` - `file` has no content
    pub fn begin(&mut self, file: &UploadFile) -> Result<&UploadJob, UploadError> {
        if self.status == UploadStatus::InProgress {
            warn!(file = %file.file_name, "Upload rejected, another job is running");
            return Err(UploadError::JobAlreadyRunning);
        }
        if file.is_empty() {
            return Err(UploadError::EmptyFile(file.file_name.clone()));
        }

        debug!(file = %file.file_name, size = file.len(), "Upload started");

        self.status = UploadStatus::InProgress;
        self.percent = 0;
        Ok(self.job.insert(UploadJob {
            file_name: file.file_name.clone(),
            file_size: file.len(),
            bytes_loaded: 0,
        }))
    }

    /// Apply a transport progress report
    ///
    /// Returns the new percentage when it changed. A report with
    /// `bytes_total == 0` keeps the previous value, and reports arriving
    /// while no job is running are dropped.
    pub fn report_progress(&mut self, bytes_loaded: u64, bytes_total: u64) -> Option<u8> {
        if self.status != UploadStatus::InProgress {
            trace!(bytes_loaded, bytes_total, "Ignoring progress with no active job");
            return None;
        }

        if let Some(job) = self.job.as_mut() {
            job.bytes_loaded = bytes_loaded;
        }

        if bytes_total == 0 {
            return None;
        }

        let percent = percent_of(bytes_loaded, bytes_total);
        if percent == self.percent {
            return None;
        }

        trace!(percent, bytes_loaded, bytes_total, "Upload progress");
        self.percent = percent;
        Some(percent)
    }

    /// Finish the running job
    ///
    /// On success the percentage is forced to 100.
    pub fn complete(&mut self, success: bool) -> Result<UploadStatus, UploadError> {
        if self.status != UploadStatus::InProgress {
            return Err(UploadError::NoActiveJob);
        }

        self.status = if success {
            self.percent = 100;
            if let Some(job) = self.job.as_mut() {
                job.bytes_loaded = job.file_size;
            }
            UploadStatus::Succeeded
        } else {
            UploadStatus::Failed
        };

        let file = self.job.as_ref().map(|j| j.file_name.as_str()).unwrap_or("");
        info!(file, status = ?self.status, percent = self.percent, "Upload finished");
        Ok(self.status)
    }

    /// Drop the last job and return to idle
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Percentage as displayed, e.g. `42%`
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn job(&self) -> Option<&UploadJob> {
        self.job.as_ref()
    }

    /// Whether a job is running
    pub fn is_busy(&self) -> bool {
        self.status == UploadStatus::InProgress
    }
}

/// Whole-number percentage of `loaded` over `total`, clamped to 0..=100
fn percent_of(loaded: u64, total: u64) -> u8 {
    let ratio = loaded as f64 / total as f64 * 100.0;
    ratio.round().clamp(0.0, 100.0) as u8
}
