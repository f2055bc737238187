//! Archive batch model and endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::PermaClient;
use crate::error::{PermaError, Result};
use crate::models::capture::CaptureJob;
use crate::models::folder::Folder;
use crate::models::user::User;
use crate::validate;

/// A bulk request that creates multiple archives into one target folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivesBatch {
    pub id: i64,

    #[serde(default)]
    pub started_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: Option<User>,

    /// One capture job per requested URL.
    #[serde(default)]
    pub capture_jobs: Vec<CaptureJob>,

    #[serde(default)]
    pub target_folder: Option<Folder>,
}

impl PermaClient {
    /// Create archives for every URL in `urls`, all into `target_folder_id`.
    ///
    /// `POST /v1/archives/batches`
    ///
    /// Every URL is validated before the request is sent; one malformed
    /// URL fails the whole call without touching the network.
    #[tracing::instrument(skip(self, urls))]
    pub async fn create_archives_batch(
        &self,
        urls: &[&str],
        target_folder_id: i64,
    ) -> Result<ArchivesBatch> {
        for url in urls {
            validate::capture_url(url)?;
        }

        let body = serde_json::json!({
            "urls": urls,
            "target_folder": target_folder_id,
        });

        let response = self.post("/v1/archives/batches", &body).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Fetch details of a batch, including the status of each of its
    /// capture jobs.
    ///
    /// `GET /v1/archives/batches/{batchId}`
    pub async fn pull_archives_batch(&self, batch_id: i64) -> Result<ArchivesBatch> {
        let response = self
            .get(&format!("/v1/archives/batches/{batch_id}"))
            .await?;
        response.json().await.map_err(PermaError::Http)
    }
}
