//! Perma API client library.
//!
//! A Rust library for interacting with the Perma.cc REST API: archived
//! snapshots of web pages, the folders that organize them, and the
//! asynchronous capture jobs that produce them.
//!
//! # Quick Start
//!
//! ```no_run
//! use permapi::{PermaClient, Pagination, CreateArchiveOptions};
//!
//! #[tokio::main]
//! async fn main() -> permapi::Result<()> {
//!     // Create client from environment variables
//!     let client = PermaClient::from_env()?;
//!
//!     // Who am I?
//!     let user = client.pull_user().await?;
//!     println!("Logged in as {} {}", user.first_name, user.last_name);
//!
//!     // Capture a page
//!     let archive = client
//!         .create_archive("https://example.com", &CreateArchiveOptions::default())
//!         .await?;
//!     println!("Created archive {}", archive.guid);
//!
//!     // List my archives
//!     let page = client.pull_archives(Pagination::new(10, 0), None).await?;
//!     println!("{} archives total", page.meta.total_count);
//!
//!     // Delete it again, waiting for in-flight captures first
//!     client.delete_archive(&archive.guid, true).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! [`PermaClient`] is the single public entry point: one async method per
//! remote capability, each a thin composition of input validation
//! ([`validate`]), request dispatch, and uniform response interpretation.
//! The one stateful flow is safe archive deletion
//! ([`PermaClient::delete_archive`]), which polls for pending captures
//! with a bounded retry loop before issuing the destructive call.
//!
//! # Configuration
//!
//! [`PermaClient::from_env`] reads:
//!
//! - `PERMA_API_KEY` (required) - Your Perma API key
//! - `PERMA_API_URL` (optional) - Endpoint root (defaults to `https://api.perma.cc`)
//!
//! [`PermaClient::builder`] configures the same plus request throttling
//! and the safe-delete poll cap/interval.

mod client;
mod error;
mod models;
mod pagination;
pub mod validate;

// Re-export core types
pub use client::{
    PermaClient, PermaClientBuilder, SAFE_DELETE_MAX_ATTEMPTS, SAFE_DELETE_POLL_INTERVAL,
};
pub use error::{PermaError, Result};
pub use pagination::{Page, Pagination, PaginationMeta, DEFAULT_PAGE_LIMIT};

// Re-export models
pub use models::{
    // Archives
    Archive,
    CreateArchiveOptions,
    EditArchiveOptions,
    // Batches
    ArchivesBatch,
    // Captures and capture jobs
    Capture,
    CaptureJob,
    CaptureJobStatus,
    CaptureRole,
    CaptureStatus,
    // Folders
    EditFolderOptions,
    Folder,
    // Organizations
    Organization,
    // Users
    User,
};
