//! Backoff retry primitive — runs an async operation up to `max_attempts`
//! times with linear backoff between tries.
//!
//! Linear (`attempt × base_delay`) rather than exponential because the target
//! failure mode is a sleeping downstream service waking up, not congestion
//! control. No jitter, no cap beyond `max_attempts`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Retry budget for one logical call. Each call site constructs its own
/// policy; there is no shared retry state anywhere in the process.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Runs `op` until it succeeds, fails non-retryably, or exhausts the policy.
///
/// Attempts are strictly sequential: attempt `n+1` never starts before
/// attempt `n` is classified and `n × base_delay` has elapsed. The last
/// failure is returned unchanged — this layer adds no error type of its own,
/// it only governs timing and the stop condition.
pub async fn retry_with_backoff<T, E, F, Fut, C>(
    policy: RetryPolicy,
    is_retryable: C,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);

    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_retryable(&err) => {
                let delay = policy.base_delay * attempt;
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "retryable failure, backing off: {err}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn policy() -> RetryPolicy {
        RetryPolicy::default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt_makes_one_call() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_with_backoff(
            policy(),
            |_| true,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }
            },
        )
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sustained_retryable_failure_uses_all_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_with_backoff(
            policy(),
            |_| true,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("503 from upstream".to_string()) }
            },
        )
        .await;
        assert_eq!(result.unwrap_err(), "503 from upstream");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_failure_aborts_after_one_call() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_with_backoff(
            policy(),
            |_| false,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("404 from upstream".to_string()) }
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cold_start_recovery_on_fourth_attempt() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();
        let result: Result<u32, String> = retry_with_backoff(
            policy(),
            |_| true,
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 4 {
                        Err("503 cold start".to_string())
                    } else {
                        Ok(42)
                    }
                }
            },
        )
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // Linear backoff: 1s + 2s + 3s between the four attempts.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_error_is_returned_unchanged() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_with_backoff(
            policy(),
            |e: &String| e.contains("503"),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(format!("503 attempt {n}")) }
            },
        )
        .await;
        assert_eq!(result.unwrap_err(), "503 attempt 4");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let p = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::from_millis(1000),
        };
        let result: Result<u32, String> = retry_with_backoff(
            p,
            |_| true,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("boom".to_string()) }
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
