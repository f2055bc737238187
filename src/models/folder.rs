//! Folder model and endpoints.
//!
//! Folders are hierarchical containers for archives and sub-folders.
//! Unlike archives they carry no asynchronous server-side processing, so
//! folder deletion is a one-shot call with no wait.

use serde::{Deserialize, Serialize};

use crate::client::PermaClient;
use crate::error::{PermaError, Result};
use crate::models::user::User;
use crate::pagination::{Page, Pagination};
use crate::validate;

/// A folder, scoped to a user or organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,

    pub name: String,

    /// API path to the parent folder, e.g. `/v1/folders/25/`.
    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub has_children: bool,

    /// Hyphen-separated folder ids from the root down to this folder.
    #[serde(default)]
    pub path: Option<String>,

    /// Owning organization id, if organization-scoped.
    #[serde(default)]
    pub organization: Option<i64>,

    #[serde(default)]
    pub is_sponsored_root_folder: bool,

    #[serde(default)]
    pub sponsored_by: Option<User>,

    #[serde(default)]
    pub read_only: bool,
}

/// Fields to change on an existing folder. Absent fields are not sent,
/// so they are left untouched remotely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditFolderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PermaClient {
    /// List the folders at the top of the current user's hierarchy.
    ///
    /// `GET /v1/folders`
    pub async fn pull_top_level_folders(&self, pagination: Pagination) -> Result<Page<Folder>> {
        validate::pagination(&pagination)?;
        let response = self.get_with_query("/v1/folders", &pagination).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Fetch details of a single folder.
    ///
    /// `GET /v1/folders/{id}/`
    pub async fn pull_folder(&self, folder_id: i64) -> Result<Folder> {
        let response = self.get(&format!("/v1/folders/{folder_id}/")).await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// List the direct children of a folder (not recursive).
    ///
    /// `GET /v1/folders/{parentId}/folders`
    pub async fn pull_folder_children(
        &self,
        parent_folder_id: i64,
        pagination: Pagination,
    ) -> Result<Page<Folder>> {
        validate::pagination(&pagination)?;
        let response = self
            .get_with_query(&format!("/v1/folders/{parent_folder_id}/folders"), &pagination)
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Create a folder under `parent_folder_id`.
    ///
    /// `POST /v1/folders/{parentId}/folders`
    #[tracing::instrument(skip(self))]
    pub async fn create_folder(&self, parent_folder_id: i64, name: &str) -> Result<Folder> {
        let body = serde_json::json!({ "name": name });
        let response = self
            .post(&format!("/v1/folders/{parent_folder_id}/folders"), &body)
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Edit a folder. Only the fields set in `options` are sent.
    ///
    /// `PATCH /v1/folders/{id}`
    pub async fn edit_folder(&self, folder_id: i64, options: &EditFolderOptions) -> Result<Folder> {
        let response = self
            .patch(&format!("/v1/folders/{folder_id}"), options)
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Move a folder under a new parent.
    ///
    /// `PUT /v1/folders/{parentId}/folders/{id}`
    pub async fn move_folder(&self, folder_id: i64, new_parent_folder_id: i64) -> Result<Folder> {
        let response = self
            .put(&format!(
                "/v1/folders/{new_parent_folder_id}/folders/{folder_id}"
            ))
            .await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Delete a folder. One-shot destructive call; resolves to `true` on
    /// success.
    ///
    /// `DELETE /v1/folders/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn delete_folder(&self, folder_id: i64) -> Result<bool> {
        self.delete(&format!("/v1/folders/{folder_id}")).await?;
        Ok(true)
    }
}
