//! User model and account endpoint.

use serde::{Deserialize, Serialize};

use crate::client::PermaClient;
use crate::error::{PermaError, Result};
use crate::models::folder::Folder;

/// The account behind the API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub short_name: String,

    #[serde(default)]
    pub full_name: Option<String>,

    /// Root folders this user can write to.
    #[serde(default)]
    pub top_level_folders: Vec<Folder>,
}

impl PermaClient {
    /// Fetch details of the current account.
    ///
    /// `GET /v1/user`
    ///
    /// # Errors
    ///
    /// Returns [`PermaError::AuthRequired`] when the client holds no API
    /// key, or an API error from the service.
    pub async fn pull_user(&self) -> Result<User> {
        let response = self.get("/v1/user").await?;
        response.json().await.map_err(PermaError::Http)
    }
}
