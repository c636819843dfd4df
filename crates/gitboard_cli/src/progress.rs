//! Progress reporting for the export.
//!
//! - Interactive mode (TTY): a single indicatif bar
//! - Logging mode (non-TTY): one tracing event per repository

use std::sync::{Arc, Mutex};

use console::Term;
use gitboard::export::{ExportProgress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};

/// What happens to the repository an event describes.
pub fn action(event: &ExportProgress, dry_run: bool) -> &'static str {
    if event.skipped {
        "exists"
    } else if dry_run {
        "would add"
    } else {
        "adding"
    }
}

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    Interactive(InteractiveReporter),
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new(dry_run: bool) -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new(dry_run))
        } else {
            Self::Logging(LoggingReporter::new(dry_run))
        }
    }

    pub fn handle(&self, event: ExportProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a callback for the exporter.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| reporter.handle(event))
    }

    /// Remove the bar so the summary line prints on a clean terminal.
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

/// Interactive progress reporter using indicatif.
///
/// The bar is created on the first event, when the total is known.
pub struct InteractiveReporter {
    dry_run: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl InteractiveReporter {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            bar: Mutex::new(None),
        }
    }

    pub fn handle(&self, event: ExportProgress) {
        let Ok(mut bar) = self.bar.lock() else {
            return;
        };
        let pb = bar.get_or_insert_with(|| {
            let pb = ProgressBar::new(event.total as u64);
            pb.set_style(Self::bar_style());
            pb
        });

        pb.set_position(event.current as u64);
        pb.set_message(format!("{}: {}", action(&event, self.dry_run), event.repo_name));
    }

    pub fn finish(&self) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("[{bar:30.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter {
    dry_run: bool,
}

impl LoggingReporter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn handle(&self, event: ExportProgress) {
        let action = action(&event, self.dry_run);
        if event.skipped {
            tracing::debug!(
                current = event.current,
                total = event.total,
                repo = %event.repo_name,
                action,
                "Skipping repository"
            );
        } else {
            tracing::info!(
                current = event.current,
                total = event.total,
                repo = %event.repo_name,
                action,
                "Exporting repository"
            );
        }
    }
}
