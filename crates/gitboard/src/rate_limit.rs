use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Type alias for the governor rate limiter.
type GovernorRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Returned when a wait is abandoned because the caller's token fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wait cancelled")]
pub struct WaitCancelled;

/// Enforces a minimum spacing between successive calls.
///
/// Backed by a governor quota of one cell per `min_interval` with a burst of
/// one: the first call passes immediately and each later call is delayed
/// until `min_interval` has elapsed since the previous one. The state lives
/// in the limiter instance, so every client gets its own spacing.
///
/// A zero interval disables spacing entirely.
///
/// # Example
///
/// ```ignore
/// use gitboard::rate_limit::MinIntervalLimiter;
///
/// let limiter = MinIntervalLimiter::new(Duration::from_secs(3));
///
/// // Before each write:
/// limiter.wait(&cancel).await?;
/// client.write().await?;
/// ```
#[derive(Clone)]
pub struct MinIntervalLimiter {
    inner: Option<Arc<GovernorRateLimiter>>,
    min_interval: Duration,
}

impl MinIntervalLimiter {
    pub fn new(min_interval: Duration) -> Self {
        let inner =
            Quota::with_period(min_interval).map(|quota| Arc::new(RateLimiter::direct(quota)));
        Self {
            inner,
            min_interval,
        }
    }

    /// The configured spacing.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next call is allowed.
    ///
    /// Returns [`WaitCancelled`] as soon as `cancel` fires, without
    /// consuming the slot. An already-cancelled token fails immediately.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<(), WaitCancelled> {
        if cancel.is_cancelled() {
            return Err(WaitCancelled);
        }

        let Some(limiter) = &self.inner else {
            return Ok(());
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(WaitCancelled),
            _ = limiter.until_ready() => Ok(()),
        }
    }
}

impl std::fmt::Debug for MinIntervalLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinIntervalLimiter")
            .field("min_interval", &self.min_interval)
            .finish()
    }
}
