//! Capture and capture job models, plus the capture job endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::PermaClient;
use crate::error::{PermaError, Result};
use crate::pagination::{Page, Pagination};
use crate::validate;

/// One constituent recording within an archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    pub role: CaptureRole,

    pub status: CaptureStatus,

    /// URL that was captured, or of the resource itself for user uploads.
    #[serde(default)]
    pub url: Option<String>,

    /// `response` or `resource`.
    #[serde(default)]
    pub record_type: String,

    /// MIME type of the content, e.g. `text/html; charset=utf-8`.
    #[serde(default)]
    pub content_type: String,

    /// Whether this was a direct upload instead of a capture.
    #[serde(default)]
    pub user_upload: bool,
}

/// What a capture records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureRole {
    Primary,
    Screenshot,
    Favicon,
}

/// Status of an individual capture.
///
/// `Pending` is the one status the safe-delete flow waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    Pending,
    Failed,
    Success,
}

/// The asynchronous unit of work that produces an archive's captures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureJob {
    pub guid: String,

    pub status: CaptureJobStatus,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub attempt: u32,

    #[serde(default)]
    pub step_count: u32,

    #[serde(default)]
    pub step_description: Option<String>,

    #[serde(default)]
    pub capture_start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub capture_end_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub queue_position: u32,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub user_deleted: bool,
}

/// Status of a capture job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureJobStatus {
    Pending,
    InProgress,
    Completed,
    Deleted,
    Failed,
    Invalid,
}

impl CaptureJobStatus {
    /// Whether the job is still being worked on.
    pub fn is_ongoing(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl PermaClient {
    /// List the current user's ongoing capture jobs.
    ///
    /// `GET /v1/capture_jobs`
    pub async fn pull_ongoing_capture_jobs(
        &self,
        pagination: Pagination,
    ) -> Result<Page<CaptureJob>> {
        validate::pagination(&pagination)?;
        let response = self.get_with_query("/v1/capture_jobs", &pagination).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Fetch the latest capture job for an archive.
    ///
    /// `GET /v1/capture_jobs/{archiveId}`
    pub async fn pull_archive_capture_job(&self, archive_guid: &str) -> Result<CaptureJob> {
        let guid = validate::archive_guid(archive_guid)?;
        let response = self.get(&format!("/v1/capture_jobs/{guid}")).await?;
        response.json().await.map_err(PermaError::Http)
    }
}
