//! Bounded retry and status polling
//!
//! Every vendor call runs inside [`retry`], which keeps calling the operation
//! while it reports a retryable error and gives up once the timeout elapses.
//! Status waits use [`StateChangeConf`], which polls a refresh function until
//! the remote object reaches one of the target states.

use crate::error::{CloudError, READ_RETRYABLE_ERROR_CODES, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Retry configuration for provider operations
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Ceiling for read-only call loops
    pub read_timeout: Duration,

    /// Ceiling for mutating call loops
    pub write_timeout: Duration,

    /// Initial delay between retries
    pub initial_delay: Duration,

    /// Maximum delay between retries
    pub max_delay: Duration,

    /// Backoff multiplier
    pub backoff_multiplier: f64,

    /// Interval between status polls
    pub poll_interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(3 * 60),
            write_timeout: Duration::from_secs(5 * 60),
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Delay before the retry following `attempt` (0-based), capped at `max_delay`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt as i32);
        let delay = self.initial_delay.as_secs_f64() * factor;
        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }
}

/// Outcome of a single attempt inside [`retry`]
#[derive(Debug)]
pub enum RetryError {
    /// Try again after a delay
    Retryable(CloudError),
    /// Stop and surface the error
    NonRetryable(CloudError),
}

impl RetryError {
    pub fn retryable(err: impl Into<CloudError>) -> Self {
        RetryError::Retryable(err.into())
    }

    pub fn non_retryable(err: impl Into<CloudError>) -> Self {
        RetryError::NonRetryable(err.into())
    }

    fn into_inner(self) -> CloudError {
        match self {
            RetryError::Retryable(e) | RetryError::NonRetryable(e) => e,
        }
    }
}

/// Classify an error, treating `additional_codes` as retryable too
pub fn retry_error(err: CloudError, additional_codes: &[&str]) -> RetryError {
    if err.is_retryable(additional_codes) {
        RetryError::Retryable(err)
    } else {
        RetryError::NonRetryable(err)
    }
}

/// Classify an error raised by a describe call
///
/// Reads also retry [`READ_RETRYABLE_ERROR_CODES`].
pub fn retry_read_error(err: CloudError, additional_codes: &[&str]) -> RetryError {
    let codes: Vec<&str> = READ_RETRYABLE_ERROR_CODES
        .iter()
        .chain(additional_codes.iter())
        .copied()
        .collect();
    retry_error(err, &codes)
}

/// Run `op` until it succeeds, fails terminally, or `timeout` elapses
pub async fn retry<T, F, Fut>(policy: &RetryConfig, timeout: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, RetryError>>,
{
    let start = Instant::now();
    let mut attempt = 0u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(RetryError::NonRetryable(e)) => return Err(e),
            Err(RetryError::Retryable(e)) => {
                let delay = policy.delay_for_attempt(attempt);
                if start.elapsed() + delay > timeout {
                    return Err(CloudError::Timeout(format!(
                        "gave up after {} attempts in {:?}: {}",
                        attempt + 1,
                        start.elapsed(),
                        e
                    )));
                }
                tracing::debug!("Retrying after {:?} (attempt {}): {}", delay, attempt + 1, e);
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Polls a refresh function until the remote status reaches a target
///
/// The refresh function returns `Ok(None)` when the object does not exist.
/// With an empty `target` list the wait succeeds once the object is gone,
/// which is how deletions are confirmed.
pub struct StateChangeConf<F> {
    /// States that keep the wait going; empty means any non-target state does
    pub pending: Vec<String>,
    /// States that end the wait
    pub target: Vec<String>,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub refresh: F,
}

impl<F, Fut> StateChangeConf<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<String>>>,
{
    pub fn new(
        pending: &[&str],
        target: &[&str],
        timeout: Duration,
        poll_interval: Duration,
        refresh: F,
    ) -> Self {
        Self {
            pending: pending.iter().map(|s| s.to_string()).collect(),
            target: target.iter().map(|s| s.to_string()).collect(),
            timeout,
            poll_interval,
            refresh,
        }
    }

    /// Block until a target state is reached; returns the final state
    /// (`None` when the object is gone)
    pub async fn wait_for_state(mut self) -> Result<Option<String>> {
        let start = Instant::now();
        let wanted = if self.target.is_empty() {
            "absence".to_string()
        } else {
            self.target.join("|")
        };

        loop {
            match (self.refresh)().await? {
                None if self.target.is_empty() => return Ok(None),
                None => {
                    tracing::debug!("Object not visible yet while waiting for {}", wanted);
                }
                Some(state) if self.target.contains(&state) => return Ok(Some(state)),
                Some(state) => {
                    if !self.pending.is_empty() && !self.pending.contains(&state) {
                        return Err(CloudError::UnexpectedState {
                            state,
                            target: wanted,
                        });
                    }
                    tracing::debug!("Current state `{}`, waiting for {}", state, wanted);
                }
            }

            if start.elapsed() + self.poll_interval > self.timeout {
                return Err(CloudError::Timeout(format!(
                    "waiting for {} exceeded {:?}",
                    wanted, self.timeout
                )));
            }
            sleep(self.poll_interval).await;
        }
    }
}

/// Shorthand for a read loop under `policy.read_timeout`
pub async fn retry_read<T, F, Fut>(policy: &RetryConfig, op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, RetryError>>,
{
    retry(policy, policy.read_timeout, op).await
}

/// Shorthand for a write loop under `policy.write_timeout`
pub async fn retry_write<T, F, Fut>(policy: &RetryConfig, op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, RetryError>>,
{
    retry(policy, policy.write_timeout, op).await
}

/// Convert a final error out of a retry classification
impl From<RetryError> for CloudError {
    fn from(err: RetryError) -> Self {
        err.into_inner()
    }
}
