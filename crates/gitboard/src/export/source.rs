//! Collaborator traits consumed by the exporter.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::github::{GitHubError, StarredRepo};
use crate::pinboard::{Bookmark, PinboardError};

/// Supplies the complete list of starred repositories.
#[async_trait]
pub trait StarredRepoSource: Send + Sync {
    /// Fetch every starred repository, in API order.
    async fn fetch_starred(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<StarredRepo>, GitHubError>;
}

/// Reads and writes bookmarks.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// URLs of all bookmarks carrying `tag`.
    async fn list_urls_by_tag(
        &self,
        tag: &str,
        cancel: &CancellationToken,
    ) -> Result<HashSet<String>, PinboardError>;

    /// Create the bookmark, replacing any existing one with the same URL.
    async fn upsert(
        &self,
        bookmark: &Bookmark,
        cancel: &CancellationToken,
    ) -> Result<(), PinboardError>;
}
