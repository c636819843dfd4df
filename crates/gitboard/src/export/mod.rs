//! Export of starred repositories into Pinboard bookmarks.
//!
//! # Module Structure
//!
//! - [`types`] - `ExportResult` and the sentinel tag
//! - [`progress`] - `ExportProgress`, `ProgressCallback`, `emit()`
//! - [`mapper`] - Repository to bookmark conversion
//! - [`source`] - The collaborator traits the exporter drives
//! - [`error`] - `ExportError` and `ExportFailure`
//! - [`exporter`] - The export loop
//!
//! # Example
//!
//! ```ignore
//! use gitboard::export::Exporter;
//! use gitboard::github::GitHubClient;
//! use gitboard::pinboard::PinboardClient;
//!
//! let exporter = Exporter::new(GitHubClient::new(&gh)?, PinboardClient::new(&pb)?)
//!     .with_dry_run(true);
//! let result = exporter.run(&cancel).await?;
//! println!("{} would add, {} skipped", result.added, result.skipped);
//! ```

mod error;
mod exporter;
mod mapper;
mod progress;
mod source;
mod types;

pub use error::{ExportError, ExportFailure};
pub use exporter::Exporter;
pub use mapper::{normalize_tags, repo_to_bookmark};
pub use progress::{ExportProgress, ProgressCallback, emit};
pub use source::{BookmarkStore, StarredRepoSource};
pub use types::{ExportResult, SENTINEL_TAG};
