//! Per-repository progress reporting.

/// Emitted once for every repository the exporter processes, before the
/// write for that repository is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    /// 1-based position in the starred list.
    pub current: usize,
    /// Number of starred repositories in this run.
    pub total: usize,
    /// `owner/name` of the repository.
    pub repo_name: String,
    /// True when the bookmark already exists and will not be written.
    pub skipped: bool,
}

/// Callback for progress updates during an export.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: ExportProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
