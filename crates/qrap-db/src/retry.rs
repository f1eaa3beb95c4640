//! Retry logic for transient remote database errors.
//!
//! Remote (`libsql://`) databases occasionally reject a statement while a
//! node is being recycled or a shared lock is contended. These errors surface
//! as Hrana 400 responses and resolve on their own within seconds.
//!
//! Local databases never encounter these errors; the retry path is gated on
//! `QrapDb::is_remote`.

use std::future::Future;
use std::time::Duration;

/// Configuration for retry behavior on transient remote errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (1-based), doubling each time.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect transient remote infrastructure errors.
///
/// The predicate is narrow so genuine SQL or constraint errors are never
/// retried.
pub fn is_transient_remote_error(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("unable to acquire shared lock")
        || msg.contains("deletion must be in progress")
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempt budget is spent.
pub(crate) async fn with_retry<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, libsql::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, libsql::Error>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if attempt < config.max_attempts && is_transient_remote_error(&e) => {
                let delay = config.delay_for(attempt);
                tracing::warn!(attempt, ?delay, error = %e, "transient remote error, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
