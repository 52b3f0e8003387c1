//! Retry policy built on `tokio-retry2`.

use postwright_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{error, warn};

/// Exponential backoff settings.
///
/// An operation gets `max_retries + 1` attempts. The wait before retry `n`
/// (counting from zero) is `initial_delay_secs * exponential_base^n`. When
/// attempts run out the last error is returned unchanged.
///
/// # Examples
///
/// ```
/// use postwright_retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, 1.0, 2.0).unwrap();
/// let delays: Vec<Duration> = policy.delays().collect();
/// assert_eq!(
///     delays,
///     vec![Duration::from_secs(1), Duration::from_secs(2), Duration::from_secs(4)]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Additional attempts after the first
    #[serde(default = "default_max_retries")]
    max_retries: usize,
    /// Delay before the first retry, in seconds
    #[serde(default = "default_initial_delay")]
    initial_delay_secs: f64,
    /// Multiplier applied to the delay after each retry
    #[serde(default = "default_exponential_base")]
    exponential_base: f64,
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay() -> f64 {
    1.0
}

fn default_exponential_base() -> f64 {
    2.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_secs: default_initial_delay(),
            exponential_base: default_exponential_base(),
        }
    }
}

impl RetryPolicy {
    /// Build a validated policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial_delay_secs` is not positive or
    /// `exponential_base` is not greater than 1.
    pub fn new(
        max_retries: usize,
        initial_delay_secs: f64,
        exponential_base: f64,
    ) -> Result<Self, ConfigError> {
        let policy = Self {
            max_retries,
            initial_delay_secs,
            exponential_base,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the invariants `new` enforces, for policies read from config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_delay_secs > 0.0 && self.initial_delay_secs.is_finite()) {
            return Err(ConfigError::new(format!(
                "Retry initial delay must be positive, got {}",
                self.initial_delay_secs
            )));
        }
        if !(self.exponential_base > 1.0 && self.exponential_base.is_finite()) {
            return Err(ConfigError::new(format!(
                "Retry exponential base must be greater than 1, got {}",
                self.exponential_base
            )));
        }
        Ok(())
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }

    /// Wait before retry `n` (zero-based), saturating at `Duration::MAX`.
    pub fn delay_for(&self, retry: usize) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let secs = self.initial_delay_secs * self.exponential_base.powi(exponent);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// The full backoff schedule, one entry per retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let policy = self.clone();
        (0..self.max_retries).map(move |n| policy.delay_for(n))
    }

    /// Run `op`, retrying every failure.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run_if(operation, op, |_| true).await
    }

    /// Run `op`, retrying only failures for which `is_retryable` holds.
    ///
    /// A non-retryable failure is returned immediately.
    pub async fn run_if<T, E, F, Fut, P>(
        &self,
        operation: &str,
        mut op: F,
        is_retryable: P,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.max_attempts();
        let is_retryable = &is_retryable;
        let mut attempt = 0usize;

        Retry::spawn(self.delays(), || {
            attempt += 1;
            let current = attempt;
            let next_delay = self.delay_for(current - 1);
            let fut = op();
            async move {
                match fut.await {
                    Ok(value) => Ok(value),
                    Err(e) if !is_retryable(&e) => {
                        warn!(operation, attempt = current, error = %e, "Permanent failure, not retrying");
                        Err(RetryError::Permanent(e))
                    }
                    Err(e) if current >= max_attempts => {
                        error!(operation, attempts = current, error = %e, "Failed after all attempts");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(
                            operation,
                            attempt = current,
                            max_attempts,
                            delay_secs = next_delay.as_secs_f64(),
                            error = %e,
                            "Attempt failed, retrying"
                        );
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                }
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq, Eq)]
    struct AttemptFailed(usize);

    impl Display for AttemptFailed {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "attempt {} failed", self.0)
        }
    }

    fn fast(max_retries: usize) -> RetryPolicy {
        RetryPolicy::new(max_retries, 0.001, 2.0).unwrap()
    }

    #[tokio::test]
    async fn test_exhaustion_makes_max_retries_plus_one_attempts() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), AttemptFailed> = fast(2)
            .run("always_fails", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(AttemptFailed(n))
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.unwrap_err(), AttemptFailed(3));
    }

    #[tokio::test]
    async fn test_eventual_success_passes_value_through() {
        let calls = AtomicUsize::new(0);
        let result = fast(3)
            .run("fails_twice", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 { Err(AttemptFailed(n)) } else { Ok("done") }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_is_single_attempt() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), AttemptFailed> = fast(0)
            .run("once", || async {
                Err(AttemptFailed(calls.fetch_add(1, Ordering::SeqCst) + 1))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), AttemptFailed> = fast(5)
            .run_if(
                "permanent",
                || async { Err(AttemptFailed(calls.fetch_add(1, Ordering::SeqCst) + 1)) },
                |_| false,
            )
            .await;

        assert_eq!(result.unwrap_err(), AttemptFailed(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delay_schedule_for_image_calls() {
        let policy = RetryPolicy::new(3, 2.0, 2.0).unwrap();
        let delays: Vec<u64> = policy.delays().map(|d| d.as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8]);
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_long_schedule_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(70, 1.0, 2.0).unwrap();
        let delays: Vec<Duration> = policy.delays().collect();
        assert_eq!(delays.len(), 70);
        assert_eq!(delays[10], Duration::from_secs(1024));
        assert_eq!(delays[69], Duration::MAX);
        assert_eq!(policy.delay_for(usize::MAX), Duration::MAX);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(RetryPolicy::new(3, 0.0, 2.0).is_err());
        assert!(RetryPolicy::new(3, 1.0, 1.0).is_err());
        assert!(RetryPolicy::new(0, 0.5, 1.5).is_ok());
    }
}
