//! Archive model and endpoints, including safe deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::PermaClient;
use crate::error::{PermaError, Result};
use crate::models::capture::{Capture, CaptureStatus};
use crate::models::organization::Organization;
use crate::models::user::User;
use crate::pagination::{Page, Pagination};
use crate::validate;

/// A stored snapshot of a captured web resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archive {
    /// GUID-like reference, e.g. `ABCD-1234`.
    pub guid: String,

    #[serde(default)]
    pub creation_timestamp: Option<DateTime<Utc>>,

    /// The URL that was captured.
    pub url: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Archive size in bytes.
    #[serde(default)]
    pub warc_size: Option<u64>,

    #[serde(default)]
    pub warc_download_url: Option<String>,

    /// Constituent recordings (primary response, screenshot, favicon).
    #[serde(default)]
    pub captures: Vec<Capture>,

    #[serde(default)]
    pub queue_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub capture_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_by: Option<User>,

    #[serde(default)]
    pub is_private: Option<bool>,

    #[serde(default)]
    pub private_reason: Option<String>,

    #[serde(default)]
    pub user_deleted: Option<bool>,

    #[serde(default)]
    pub archive_timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub organization: Option<Organization>,
}

impl Archive {
    /// Whether any capture is still pending, making deletion unsafe.
    pub fn has_pending_capture(&self) -> bool {
        self.captures
            .iter()
            .any(|capture| capture.status == CaptureStatus::Pending)
    }
}

/// Options for creating an archive. Each field is sent only when set, so
/// the service applies its own defaults for absent ones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateArchiveOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Folder to create the archive in.
    #[serde(rename = "folder", skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<i64>,

    #[serde(rename = "is_private", skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields to change on an existing archive. Absent fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditArchiveOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "is_private", skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PermaClient {
    /// Capture `url` into a new archive.
    ///
    /// `POST /v1/archives`
    ///
    /// The returned archive's captures are processed asynchronously; poll
    /// [`pull_archive_capture_job`](Self::pull_archive_capture_job) to
    /// track progress.
    #[tracing::instrument(skip(self, options))]
    pub async fn create_archive(
        &self,
        url: &str,
        options: &CreateArchiveOptions,
    ) -> Result<Archive> {
        let url = validate::capture_url(url)?;

        #[derive(Serialize)]
        struct Body<'a> {
            url: &'a str,
            #[serde(flatten)]
            options: &'a CreateArchiveOptions,
        }

        let response = self.post("/v1/archives", &Body { url, options }).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Fetch details of one of the current user's archives.
    ///
    /// `GET /v1/archives/{id}`
    pub async fn pull_archive(&self, archive_guid: &str) -> Result<Archive> {
        let guid = validate::archive_guid(archive_guid)?;
        let response = self.get(&format!("/v1/archives/{guid}")).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Edit an archive. Only the fields set in `options` are sent.
    ///
    /// `PATCH /v1/archives/{id}`
    pub async fn edit_archive(
        &self,
        archive_guid: &str,
        options: &EditArchiveOptions,
    ) -> Result<Archive> {
        let guid = validate::archive_guid(archive_guid)?;
        let response = self.patch(&format!("/v1/archives/{guid}"), options).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Move an archive into a folder.
    ///
    /// `PUT /v1/folders/{folderId}/archives/{archiveId}`
    pub async fn move_archive(&self, archive_guid: &str, folder_id: i64) -> Result<Archive> {
        let guid = validate::archive_guid(archive_guid)?;
        let response = self
            .put(&format!("/v1/folders/{folder_id}/archives/{guid}"))
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Delete an archive; resolves to `true` on success.
    ///
    /// `DELETE /v1/archives/{id}`
    ///
    /// With `safe_mode` on (the recommended default), the archive's detail
    /// is polled first and the call waits while any capture is still
    /// `pending`: deleting an archive mid-capture risks inconsistent
    /// server-side state. The wait is bounded: after
    /// [`SAFE_DELETE_MAX_ATTEMPTS`](crate::SAFE_DELETE_MAX_ATTEMPTS)
    /// polls the delete proceeds anyway rather than blocking forever on a
    /// stuck job. Poll cap and interval are configurable on the builder.
    ///
    /// A failed detail fetch (e.g. the archive does not exist) propagates
    /// immediately; a missing archive is not treated as safe to skip.
    #[tracing::instrument(skip(self))]
    pub async fn delete_archive(&self, archive_guid: &str, safe_mode: bool) -> Result<bool> {
        let guid = validate::archive_guid(archive_guid)?;

        if safe_mode {
            for attempt in 0..self.safe_delete_max_attempts() {
                let archive = self.pull_archive(guid).await?;
                if !archive.has_pending_capture() {
                    break;
                }
                tracing::debug!(guid, attempt, "capture still pending, waiting before retry");
                tokio::time::sleep(self.safe_delete_poll_interval()).await;
            }
        }

        self.delete(&format!("/v1/archives/{guid}")).await?;
        Ok(true)
    }

    /// List the current user's archives.
    ///
    /// `GET /v1/archives`
    ///
    /// `url` filters the listing to archives of that URL when provided.
    pub async fn pull_archives(
        &self,
        pagination: Pagination,
        url: Option<&str>,
    ) -> Result<Page<Archive>> {
        validate::pagination(&pagination)?;

        #[derive(Serialize)]
        struct Query<'a> {
            limit: u32,
            offset: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            url: Option<&'a str>,
        }

        let query = Query {
            limit: pagination.limit,
            offset: pagination.offset,
            url,
        };
        let response = self.get_with_query("/v1/archives", &query).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// List the archives in a folder.
    ///
    /// `GET /v1/folders/{id}/archives`
    pub async fn pull_folder_archives(
        &self,
        folder_id: i64,
        pagination: Pagination,
    ) -> Result<Page<Archive>> {
        validate::pagination(&pagination)?;
        let response = self
            .get_with_query(&format!("/v1/folders/{folder_id}/archives"), &pagination)
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// List publicly available archives. No API key needed; no
    /// authorization header is sent even when one is held.
    ///
    /// `GET /v1/public/archives`
    pub async fn pull_public_archives(&self, pagination: Pagination) -> Result<Page<Archive>> {
        validate::pagination(&pagination)?;
        let response = self
            .get_public_with_query("/v1/public/archives", &pagination)
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Fetch details of a public archive. No API key needed.
    ///
    /// `GET /v1/public/archives/{archiveId}`
    pub async fn pull_public_archive(&self, archive_guid: &str) -> Result<Archive> {
        let guid = validate::archive_guid(archive_guid)?;
        let response = self.get_public(&format!("/v1/public/archives/{guid}")).await?;
        response.json().await.map_err(PermaError::Http)
    }
}
