//! Retry controller with exponential backoff.
//!
//! Attempt `n` (zero-based) that fails with a retryable kind is followed by a
//! suspension of `base_delay * 2^n` and attempt `n + 1`, until `max_attempts`
//! attempts have been made. The last failure is returned unchanged. Errors of
//! a kind outside the policy's retry set are returned immediately.

use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::domain::errors::{ErrorKind, RetryableError};
use crate::domain::models::RetryConfig;
use crate::domain::ports::{Sleeper, TokioSleeper};

/// Retry policy configuration for handling transient errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    max_attempts: u32,
    /// Delay before the first retry
    base_delay: Duration,
    /// Error kinds that trigger a retry
    retry_on: HashSet<ErrorKind>,
}

impl RetryPolicy {
    /// Create a policy that retries transient errors.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use dead_air::services::retry::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new(3, Duration::from_secs(1));
    /// assert_eq!(policy.delay_for(1), Duration::from_secs(2));
    /// ```
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        assert!(max_attempts > 0, "max_attempts must be greater than 0");

        Self {
            max_attempts,
            base_delay,
            retry_on: HashSet::from([ErrorKind::Transient]),
        }
    }

    /// Build from loaded configuration. Out-of-range delays collapse to zero.
    pub fn from_config(config: &RetryConfig) -> Self {
        let base_delay =
            Duration::try_from_secs_f64(config.base_delay_secs).unwrap_or(Duration::ZERO);
        Self::new(config.max_attempts.max(1), base_delay)
    }

    /// Replace the set of error kinds that trigger a retry.
    #[must_use]
    pub fn retry_on(mut self, kinds: impl IntoIterator<Item = ErrorKind>) -> Self {
        self.retry_on = kinds.into_iter().collect();
        self
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn is_retryable(&self, kind: ErrorKind) -> bool {
        self.retry_on.contains(&kind)
    }

    /// Suspension after failed attempt `attempt` (zero-based): `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    /// Three attempts, one second base delay, transient errors only.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Executes operations under a [`RetryPolicy`].
///
/// Holds no state between calls; each `execute` starts from attempt zero.
#[derive(Clone)]
pub struct RetryController {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

/// Build a controller that sleeps on the tokio timer.
pub fn with_retry(policy: RetryPolicy) -> RetryController {
    RetryController::new(policy)
}

impl RetryController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    /// Use a custom sleeper (tests record the requested delays).
    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `operation`, retrying errors whose kind is in the policy's retry set.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError,
    {
        let policy = &self.policy;
        self.execute_when(operation, |err: &E| policy.is_retryable(err.kind()))
            .await
    }

    /// Execute `operation`, retrying errors for which `should_retry` returns true.
    pub async fn execute_when<F, Fut, T, E, P>(&self, mut operation: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!("Operation succeeded after {} retries", attempt);
                    }
                    return Ok(result);
                }
                Err(err) => {
                    if !should_retry(&err) {
                        debug!("Permanent error, not retrying: {}", err);
                        return Err(err);
                    }

                    if attempt + 1 >= max_attempts {
                        error!("All {} attempts failed: {}", max_attempts, err);
                        return Err(err);
                    }

                    let backoff = self.policy.delay_for(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}...",
                        attempt + 1,
                        max_attempts,
                        err,
                        backoff
                    );

                    self.sleeper.sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
