//! Pinboard API error types.

use thiserror::Error;

use crate::http::HttpError;
use crate::rate_limit::WaitCancelled;

/// Errors that can occur when talking to the Pinboard v1 API.
#[derive(Debug, Error)]
pub enum PinboardError {
    #[error("Pinboard request failed: {0}")]
    Http(#[from] HttpError),

    #[error("Invalid Pinboard API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP 200 whose payload reports something other than `done`.
    #[error("API error: result_code was {0:?}")]
    ResultCode(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<WaitCancelled> for PinboardError {
    fn from(_: WaitCancelled) -> Self {
        Self::Cancelled
    }
}

impl PinboardError {
    /// Check if this error came from a cancelled token.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
