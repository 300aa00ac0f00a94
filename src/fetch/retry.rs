//! Retry policy for single-request primitives.
//!
//! `RetryPolicy` knows nothing about archives or domains: it runs an attempt
//! closure up to `max_attempts` times and sleeps a backoff chosen by the
//! failure kind between attempts.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::config::RATE_LIMIT_BACKOFF_FACTOR;
use crate::error_handling::ErrorType;

/// Outcome of one attempt.
#[derive(Debug)]
pub enum Attempt<T> {
    /// The attempt produced a definitive answer (possibly "no data"); stop.
    Done(Option<T>),
    /// The attempt failed in a way that may succeed later.
    Failed(ErrorType),
}

/// Bounded linear backoff keyed by failure kind.
///
/// The delay before retry `n` (1-based attempt that just failed) is `n × base`,
/// doubled when the archive answered 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Total attempts per call, never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Backoff after `attempt` failed with `kind`.
    pub fn delay_for(&self, kind: ErrorType, attempt: u32) -> Duration {
        let linear = self.base_delay.saturating_mul(attempt);
        if kind.is_rate_limited() {
            linear.saturating_mul(RATE_LIMIT_BACKOFF_FACTOR)
        } else {
            linear
        }
    }

    /// Runs `attempt_fn` until it returns `Attempt::Done` or the budget is spent.
    ///
    /// `target` is only used for log lines. The closure receives the 1-based
    /// attempt index. Returns `None` when every attempt failed; no sleep follows
    /// the final attempt.
    pub async fn run<T, F, Fut>(&self, target: &str, mut attempt_fn: F) -> Option<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let max = self.max_attempts();
        for attempt in 1..=max {
            match attempt_fn(attempt).await {
                Attempt::Done(value) => {
                    debug!("[{attempt}/{max}] Completed {target}");
                    return value;
                }
                Attempt::Failed(kind) => {
                    warn!("[{attempt}/{max}] {kind} for {target}");
                    if attempt < max {
                        tokio::time::sleep(self.delay_for(kind, attempt)).await;
                    }
                }
            }
        }
        warn!("Giving up on {target} after {max} attempts");
        None
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            crate::config::RETRY_MAX_ATTEMPTS,
            Duration::from_millis(crate::config::RETRY_BASE_DELAY_MS),
        )
    }
}
