//! Bounded retry execution for polling operations
//!
//! A deliberately small engine: a policy says how many attempts to make and
//! how long to sleep between them, a predicate says which errors are worth
//! retrying, and the result distinguishes exhausted retries from errors that
//! were never retryable. Delays are fixed; this tool has no use for backoff
//! or jitter.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// How to space retry attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryStrategy {
    /// Retry immediately with no delay
    None,

    /// Fixed delay between attempts
    #[default]
    FixedDelay,
}

/// Retry policy for an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,

    /// Delay strategy between attempts
    #[serde(default)]
    pub strategy: RetryStrategy,

    /// Delay between attempts in milliseconds
    pub delay_ms: u64,
}

impl RetryPolicy {
    /// A fixed-delay policy
    pub const fn fixed(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            strategy: RetryStrategy::FixedDelay,
            delay_ms,
        }
    }

    /// The delay to wait after a failed attempt
    pub fn delay(&self) -> Duration {
        match self.strategy {
            RetryStrategy::None => Duration::ZERO,
            RetryStrategy::FixedDelay => Duration::from_millis(self.delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, 1000)
    }
}

/// Errors that can come out of a retried operation
#[derive(Debug)]
pub enum RetryError<E> {
    /// All attempts have been used up; carries the error from the final one
    Exhausted {
        attempts: u32,
        source: E,
        total_duration: Duration,
    },

    /// The predicate ruled the error out of retrying on its first occurrence
    NonRetryable(E),
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted {
                attempts,
                source,
                total_duration,
            } => write!(
                f,
                "retry exhausted after {} attempts over {:.2}s: {}",
                attempts,
                total_duration.as_secs_f64(),
                source
            ),
            RetryError::NonRetryable(source) => write!(f, "non-retryable error: {}", source),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::NonRetryable(source) => Some(source),
        }
    }
}

impl<E> RetryError<E> {
    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::NonRetryable(_) => 1,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    pub fn is_non_retryable(&self) -> bool {
        matches!(self, RetryError::NonRetryable(_))
    }

    /// Recover the underlying error
    pub fn into_source(self) -> E {
        match self {
            RetryError::Exhausted { source, .. } => source,
            RetryError::NonRetryable(source) => source,
        }
    }
}

/// Execute `op` under `policy`, retrying every error
pub async fn retry_with_policy<F, Fut, T, E>(
    operation: &str,
    policy: &RetryPolicy,
    op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    retry_if(operation, policy, |_| true, op).await
}

/// Execute `op` under `policy`, retrying only errors accepted by `should_retry`
///
/// `operation` names the work in retry log lines.
pub async fn retry_if<F, Fut, T, E, P>(
    operation: &str,
    policy: &RetryPolicy,
    should_retry: P,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: fmt::Display,
    P: Fn(&E) -> bool,
{
    let start = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        debug!(operation, attempt, max_attempts = policy.max_attempts, "starting attempt");

        match op().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(operation, attempt, "succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !should_retry(&err) {
                    warn!(operation, attempt, error = %err, "error is not retryable");
                    return Err(RetryError::NonRetryable(err));
                }

                if attempt >= policy.max_attempts {
                    error!(operation, attempts = attempt, error = %err, "all retry attempts exhausted");
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        source: err,
                        total_duration: start.elapsed(),
                    });
                }

                let delay = policy.delay();
                warn!(
                    operation,
                    attempt,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "attempt failed, will retry"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn test_policy() -> RetryPolicy {
        RetryPolicy::fixed(3, 10)
    }

    #[tokio::test]
    async fn immediate_success() {
        let result: Result<&str, RetryError<io::Error>> =
            retry_with_policy("test", &test_policy(), || async { Ok("success") }).await;

        assert_eq!(result.unwrap(), "success");
    }

    #[tokio::test]
    async fn success_after_retry() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = retry_with_policy("test", &test_policy(), || {
            let attempts = attempts_clone.clone();
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 2 {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "timeout"))
                } else {
                    Ok("success")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn all_attempts_exhausted() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<&str, RetryError<io::Error>> =
            retry_with_policy("test", &test_policy(), || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(io::Error::new(io::ErrorKind::TimedOut, "always fails"))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_error_propagates_source() {
        let result: Result<&str, RetryError<io::Error>> =
            retry_with_policy("test", &RetryPolicy::fixed(2, 0), || async {
                Err(io::Error::new(io::ErrorKind::NotFound, "missing snapshot"))
            })
            .await;

        let source = result.unwrap_err().into_source();
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
        assert_eq!(source.to_string(), "missing snapshot");
    }

    #[tokio::test]
    async fn non_retryable_short_circuits() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<&str, RetryError<io::Error>> = retry_if(
            "test",
            &test_policy(),
            |err: &io::Error| err.kind() != io::ErrorKind::NotFound,
            || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
                }
            },
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.is_non_retryable());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_max_attempts_still_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<&str, RetryError<io::Error>> =
            retry_with_policy("test", &RetryPolicy::fixed(0, 0), || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(io::Error::other("error"))
                }
            })
            .await;

        assert!(result.unwrap_err().is_exhausted());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn none_strategy_has_zero_delay() {
        let policy = RetryPolicy {
            max_attempts: 3,
            strategy: RetryStrategy::None,
            delay_ms: 5000,
        };
        assert!(policy.delay().is_zero());
    }

    #[test]
    fn display_mentions_attempts_and_source() {
        let err: RetryError<io::Error> = RetryError::Exhausted {
            attempts: 11,
            source: io::Error::new(io::ErrorKind::TimedOut, "connection timeout"),
            total_duration: Duration::from_secs(300),
        };

        let display = format!("{}", err);
        assert!(display.contains("11 attempts"));
        assert!(display.contains("connection timeout"));
    }
}
