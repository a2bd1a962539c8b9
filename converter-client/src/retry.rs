//! Bounded retry for gateway calls.

use std::future::Future;
use std::time::Duration;

use converter_types::GatewayError;
use tokio::time::sleep;
use tracing::debug;

/// How many times a call is attempted in total, and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Currency list: two attempts in total.
    pub const CURRENCIES: RetryPolicy = RetryPolicy::attempts(2);

    /// Conversion: the first call plus one retry.
    pub const CONVERSION: RetryPolicy = RetryPolicy::attempts(2);

    pub const fn attempts(attempts: u32) -> Self {
        Self {
            attempts,
            delay: Duration::ZERO,
        }
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// the policy's attempts are used up. The last error is returned.
pub async fn with_retry<T, F, Fut>(
    operation: &str,
    policy: RetryPolicy,
    mut attempt: F,
) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let attempts = policy.attempts.max(1);
    let mut tried = 0;
    loop {
        tried += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && tried < attempts => {
                debug!(operation, attempt = tried, error = %err, "retrying");
                if !policy.delay.is_zero() {
                    sleep(policy.delay).await;
                }
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transport_error() -> GatewayError {
        GatewayError::Transport("connection reset".into())
    }

    #[tokio::test]
    async fn test_succeeds_first_time() {
        let calls = &AtomicU32::new(0);
        let result = with_retry("op", RetryPolicy::attempts(3), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, GatewayError>(7)
        })
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = &AtomicU32::new(0);
        let result = with_retry("op", RetryPolicy::attempts(2), move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(transport_error())
            } else {
                Ok(1)
            }
        })
        .await;
        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_attempts() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = with_retry("op", RetryPolicy::CONVERSION, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(transport_error())
        })
        .await;
        assert_eq!(result, Err(transport_error()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_shape_not_retried() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = with_retry("op", RetryPolicy::attempts(5), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(GatewayError::InvalidShape {
                endpoint: "convert".into(),
                reason: "not json".into(),
            })
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_between_attempts() {
        let started = tokio::time::Instant::now();
        let policy = RetryPolicy::attempts(3).with_delay(Duration::from_millis(200));
        let result: Result<(), _> =
            with_retry("op", policy, || async { Err(transport_error()) }).await;
        assert!(result.is_err());
        assert!(started.elapsed() >= Duration::from_millis(400));
    }
}
