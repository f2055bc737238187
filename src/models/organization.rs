//! Organization model and endpoints.

use serde::{Deserialize, Serialize};

use crate::client::PermaClient;
use crate::error::{PermaError, Result};
use crate::models::folder::Folder;
use crate::pagination::Page;

/// An organization the current user belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub registrar: String,

    #[serde(default)]
    pub default_to_private: bool,

    /// Folder shared at organization level, if any.
    #[serde(default)]
    pub shared_folder: Option<Folder>,
}

impl PermaClient {
    /// List the organizations the current user belongs to.
    ///
    /// `GET /v1/organizations`
    pub async fn pull_organizations(&self) -> Result<Page<Organization>> {
        let response = self.get("/v1/organizations").await?;
        response.json().await.map_err(PermaError::Http)
    }

    /// Fetch details of a single organization.
    ///
    /// `GET /v1/organization/{id}`
    pub async fn pull_organization(&self, organization_id: i64) -> Result<Organization> {
        let response = self
            .get(&format!("/v1/organization/{organization_id}"))
            .await?;
        response.json().await.map_err(PermaError::Http)
    }
}
