//! Export error types.

use thiserror::Error;

use super::types::ExportResult;
use crate::github::GitHubError;
use crate::pinboard::PinboardError;

/// The collaborator error that stopped an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Pinboard(#[from] PinboardError),
}

impl ExportError {
    /// Check if the run stopped because its token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::GitHub(e) => e.is_cancelled(),
            Self::Pinboard(e) => e.is_cancelled(),
        }
    }
}

/// A failed export together with the counts reached before the failure.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ExportFailure {
    pub result: ExportResult,
    #[source]
    pub error: ExportError,
}

impl ExportFailure {
    pub fn new(result: ExportResult, error: impl Into<ExportError>) -> Self {
        Self {
            result,
            error: error.into(),
        }
    }
}
