//! Retry with exponential backoff for transient upstream failures
//!
//! The retry loop is modeled as an explicit state machine rather than nested
//! control flow: a request is `Attempting`, and on a retryable failure moves
//! to `Retrying` (a cancellable backoff wait) before attempting again, until
//! it succeeds or the attempt budget is `Exhausted`.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{EuropePmcError, Result};

/// Classification of errors for retry decisions
pub trait RetryableError {
    /// Whether this error represents a transient condition worth retrying
    fn is_retryable(&self) -> bool;

    /// Short human-readable reason used in retry log lines
    fn retry_reason(&self) -> &str;
}

/// Retry policy: attempt budget and backoff delays
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first (must be >= 1)
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub base_delay: Duration,
    /// Upper bound on the backoff delay
    pub max_delay: Duration,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Per-request retry progress; discarded when the request resolves
enum RetryState {
    Attempting { attempt: u32, delay: Duration },
    Retrying { attempt: u32, delay: Duration },
    Exhausted { attempts: u32, err: EuropePmcError },
}

/// Run `operation`, retrying retryable failures with exponential backoff.
///
/// Both the in-flight attempt and the backoff wait race against `cancel`;
/// cancellation surfaces as [`EuropePmcError::Cancelled`]. Non-retryable
/// errors are returned immediately without consuming further attempts.
/// When the budget is exhausted the last error is folded into
/// [`EuropePmcError::TransientFailure`].
pub async fn with_retry<T, F, Fut>(
    operation: F,
    config: &RetryConfig,
    cancel: &CancellationToken,
    operation_name: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut state = RetryState::Attempting {
        attempt: 1,
        delay: config.base_delay,
    };

    loop {
        state = match state {
            RetryState::Attempting { attempt, delay } => {
                let result = tokio::select! {
                    _ = cancel.cancelled() => return Err(EuropePmcError::Cancelled),
                    result = operation() => result,
                };

                match result {
                    Ok(value) => {
                        if attempt > 1 {
                            debug!(operation = operation_name, attempt, "Succeeded after retry");
                        }
                        return Ok(value);
                    }
                    Err(err) if err.is_retryable() => {
                        if attempt >= config.max_attempts {
                            RetryState::Exhausted {
                                attempts: attempt,
                                err,
                            }
                        } else {
                            warn!(
                                operation = operation_name,
                                attempt,
                                reason = err.retry_reason(),
                                delay_ms = delay.as_millis() as u64,
                                "Transient failure, backing off before retry"
                            );
                            RetryState::Retrying { attempt, delay }
                        }
                    }
                    Err(err) => return Err(err),
                }
            }

            RetryState::Retrying { attempt, delay } => {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(EuropePmcError::Cancelled),
                    _ = tokio::time::sleep(jittered(delay)) => {}
                }
                RetryState::Attempting {
                    attempt: attempt + 1,
                    delay: (delay * 2).min(config.max_delay),
                }
            }

            RetryState::Exhausted { attempts, err } => {
                return Err(EuropePmcError::TransientFailure {
                    attempts,
                    last_status: err.status(),
                    message: err.to_string(),
                });
            }
        };
    }
}

/// Additive jitter of up to 10% so concurrent callers do not retry in
/// lockstep. Never shortens the delay.
fn jittered(delay: Duration) -> Duration {
    let extra = rand::thread_rng().gen_range(0.0..=0.1);
    delay + delay.mul_f64(extra)
}
