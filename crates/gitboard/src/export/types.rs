//! Result types and constants for an export run.

/// Tag applied to every exported bookmark and used to find earlier exports.
pub const SENTINEL_TAG: &str = "github-repo";

/// Counts for an export run.
///
/// `added + skipped` is the number of repositories processed, which equals
/// `total` when the run completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportResult {
    /// Number of starred repositories fetched.
    pub total: usize,
    /// Bookmarks written, or that would be written in a dry run.
    pub added: usize,
    /// Repositories whose URL was already bookmarked.
    pub skipped: usize,
}

impl ExportResult {
    /// Number of repositories handled so far.
    #[inline]
    pub fn processed(&self) -> usize {
        self.added + self.skipped
    }

    /// Whether every fetched repository was handled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }
}
