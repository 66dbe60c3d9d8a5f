//! Reusable retry and race-against-timeout helpers for backend invocations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Run `operation` up to `max_attempts` times, returning the first success.
///
/// Failed attempts short of the limit are logged at `warn` level and retried immediately;
/// the final failure is returned to the caller. A `max_attempts` of zero behaves like one.
pub async fn with_retry<T, E, F, Fut>(max_attempts: usize, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %error, "Attempt failed; retrying");
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Spawn `operation` as a task and race it against `limit`.
///
/// Returns `None` when the deadline wins. The losing task is abandoned, not cancelled:
/// it may keep running on the executor, but its result is discarded. `None` is also
/// returned when the task panics.
pub async fn spawn_with_timeout<F, T>(limit: Duration, operation: F) -> Option<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(operation);
    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(join_error)) => {
            tracing::error!(error = %join_error, "Spawned operation panicked");
            None
        }
        Err(_) => {
            tracing::warn!(limit_secs = limit.as_secs(), "Operation abandoned after deadline");
            None
        }
    }
}
