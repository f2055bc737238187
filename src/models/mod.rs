//! Perma API model types.
//!
//! Each file holds the serde models for one entity family plus the
//! `PermaClient` methods that operate on it.

mod archive;
mod batch;
mod capture;
mod folder;
mod organization;
mod user;

pub use archive::*;
pub use batch::*;
pub use capture::*;
pub use folder::*;
pub use organization::*;
pub use user::*;
