//! Bounded retry for transient failures.

use std::{future::Future, time::Duration};

use tracing::warn;

/// Re-invokes an operation a bounded number of times when it fails with an
/// error the caller considers transient.
///
/// Every network-touching call site wraps itself independently with its own
/// retryable-error predicate; non-retryable errors (authorization denials,
/// precondition violations) propagate on first occurrence.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `operation`, retrying while `is_retryable` holds and attempts
    /// remain. Exhausting the budget returns the last error.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        operation_name: &'static str,
        mut operation: F,
        is_retryable: P,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && is_retryable(&err) => {
                    warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "transient failure, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.delay).await;
                },
                Err(err) => return Err(err),
            }
        }
    }
}
