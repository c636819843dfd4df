//! The export loop: starred repositories in, bookmarks out.

use tokio_util::sync::CancellationToken;

use super::error::ExportFailure;
use super::mapper::repo_to_bookmark;
use super::progress::{ExportProgress, ProgressCallback, emit};
use super::source::{BookmarkStore, StarredRepoSource};
use super::types::{ExportResult, SENTINEL_TAG};

/// Copies starred repositories into a bookmark store.
///
/// Each repository is mapped to a [`Bookmark`](crate::pinboard::Bookmark);
/// repositories whose URL already carries the sentinel tag in the store are
/// skipped, so running the export twice in a row writes nothing the second
/// time. Repositories are processed one at a time, in the order the source
/// returns them.
pub struct Exporter<S, B> {
    source: S,
    store: B,
    dry_run: bool,
    on_progress: Option<ProgressCallback>,
}

impl<S, B> Exporter<S, B>
where
    S: StarredRepoSource,
    B: BookmarkStore,
{
    pub fn new(source: S, store: B) -> Self {
        Self {
            source,
            store,
            dry_run: false,
            on_progress: None,
        }
    }

    /// Count would-be writes without sending them.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    /// Run the export.
    ///
    /// A failure while listing either side returns zero counts. A failed
    /// write stops the run and returns the counts reached so far; the failed
    /// repository is counted in neither `added` nor `skipped`.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<ExportResult, ExportFailure> {
        let repos = self
            .source
            .fetch_starred(cancel)
            .await
            .map_err(|e| ExportFailure::new(ExportResult::default(), e))?;

        let existing = self
            .store
            .list_urls_by_tag(SENTINEL_TAG, cancel)
            .await
            .map_err(|e| ExportFailure::new(ExportResult::default(), e))?;

        let mut result = ExportResult {
            total: repos.len(),
            ..ExportResult::default()
        };

        tracing::info!(
            total = result.total,
            existing = existing.len(),
            dry_run = self.dry_run,
            "Starting export"
        );

        for (index, repo) in repos.iter().enumerate() {
            let bookmark = repo_to_bookmark(repo);
            let skipped = existing.contains(&bookmark.url);

            emit(
                self.on_progress.as_ref(),
                ExportProgress {
                    current: index + 1,
                    total: result.total,
                    repo_name: repo.full_name.clone(),
                    skipped,
                },
            );

            if skipped {
                tracing::debug!(repo = %repo.full_name, "Already bookmarked");
                result.skipped += 1;
                continue;
            }

            if !self.dry_run
                && let Err(e) = self.store.upsert(&bookmark, cancel).await
            {
                tracing::warn!(repo = %repo.full_name, error = %e, "Failed to save bookmark");
                return Err(ExportFailure::new(result, e));
            }
            result.added += 1;
        }

        tracing::info!(
            added = result.added,
            skipped = result.skipped,
            total = result.total,
            "Export complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;
    use crate::github::{GitHubError, StarredRepo};
    use crate::pinboard::{Bookmark, PinboardError};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    struct FakeSource(Vec<StarredRepo>);

    #[async_trait]
    impl StarredRepoSource for FakeSource {
        async fn fetch_starred(
            &self,
            _cancel: &CancellationToken,
        ) -> Result<Vec<StarredRepo>, GitHubError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        existing: HashSet<String>,
        written: Mutex<Vec<Bookmark>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl BookmarkStore for FakeStore {
        async fn list_urls_by_tag(
            &self,
            _tag: &str,
            _cancel: &CancellationToken,
        ) -> Result<HashSet<String>, PinboardError> {
            Ok(self.existing.clone())
        }

        async fn upsert(
            &self,
            bookmark: &Bookmark,
            _cancel: &CancellationToken,
        ) -> Result<(), PinboardError> {
            if self.fail_on.as_deref() == Some(bookmark.url.as_str()) {
                return Err(PinboardError::ResultCode("something went wrong".into()));
            }
            self.written.lock().unwrap().push(bookmark.clone());
            Ok(())
        }
    }

    fn repo(name: &str) -> StarredRepo {
        StarredRepo {
            full_name: format!("owner/{name}"),
            html_url: format!("https://github.com/owner/{name}"),
            description: String::new(),
            topics: Vec::new(),
            starred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_writes_every_new_repo() {
        let store = FakeStore::default();
        let exporter = Exporter::new(FakeSource(vec![repo("a"), repo("b")]), store);

        let result = exporter.run(&CancellationToken::new()).await.unwrap();

        assert_eq!(
            result,
            ExportResult {
                total: 2,
                added: 2,
                skipped: 0
            }
        );
        assert_eq!(exporter.store.written.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_existing_urls_are_skipped() {
        let store = FakeStore {
            existing: HashSet::from(["https://github.com/owner/a".to_string()]),
            ..FakeStore::default()
        };
        let exporter = Exporter::new(FakeSource(vec![repo("a"), repo("b")]), store);

        let result = exporter.run(&CancellationToken::new()).await.unwrap();

        assert_eq!(result.added, 1);
        assert_eq!(result.skipped, 1);
        let written = exporter.store.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].url, "https://github.com/owner/b");
    }

    #[tokio::test]
    async fn test_dry_run_counts_without_writing() {
        let exporter = Exporter::new(FakeSource(vec![repo("a"), repo("b")]), FakeStore::default())
            .with_dry_run(true);

        let result = exporter.run(&CancellationToken::new()).await.unwrap();

        assert_eq!(result.added, 2);
        assert!(exporter.store.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_returns_partial_counts() {
        let store = FakeStore {
            fail_on: Some("https://github.com/owner/b".to_string()),
            ..FakeStore::default()
        };
        let exporter = Exporter::new(FakeSource(vec![repo("a"), repo("b"), repo("c")]), store);

        let failure = exporter.run(&CancellationToken::new()).await.unwrap_err();

        assert_eq!(
            failure.result,
            ExportResult {
                total: 3,
                added: 1,
                skipped: 0
            }
        );
        assert!(matches!(
            failure.error,
            ExportError::Pinboard(PinboardError::ResultCode(_))
        ));
        assert_eq!(exporter.store.written.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_progress_emitted_before_write() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let store = FakeStore {
            fail_on: Some("https://github.com/owner/a".to_string()),
            ..FakeStore::default()
        };
        let exporter = Exporter::new(FakeSource(vec![repo("a")]), store).with_progress(Box::new(
            move |e| events_clone.lock().unwrap().push(e),
        ));

        let _ = exporter.run(&CancellationToken::new()).await;

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].repo_name, "owner/a");
        assert!(!events[0].skipped);
    }
}
