//! Gitboard - export GitHub stars to Pinboard.
//!
//! Every repository the authenticated user has starred becomes a private
//! Pinboard bookmark tagged `github-repo` plus the repository's topics.
//! Bookmarks that already exist under that tag are left alone, so the export
//! can be re-run at any time.
//!
//! # Example
//!
//! ```ignore
//! use gitboard::{Exporter, GitHubClient, PinboardClient};
//! use tokio_util::sync::CancellationToken;
//!
//! let github = GitHubClient::new(&github_token)?;
//! let pinboard = PinboardClient::new(&pinboard_token)?;
//!
//! let result = Exporter::new(github, pinboard)
//!     .run(&CancellationToken::new())
//!     .await?;
//! println!("{} added, {} skipped", result.added, result.skipped);
//! ```

pub mod export;
pub mod github;
pub mod http;
pub mod pinboard;
pub mod rate_limit;

pub use export::{
    BookmarkStore, ExportError, ExportFailure, ExportProgress, ExportResult, Exporter,
    ProgressCallback, SENTINEL_TAG, StarredRepoSource,
};
pub use github::{GitHubClient, GitHubError, StarredRepo};
pub use pinboard::{Bookmark, PinboardClient, PinboardError};
