//! Deadline-bound external calls.
//!
//! Every call to the identity provider or record store is raced against a
//! fixed timer. Losing the race drops the in-flight future; a response that
//! would have arrived later is never observed.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{AppError, AppResult};

/// Run `operation` to completion or fail with [`AppError::Timeout`] once
/// `deadline` elapses. The operation's own errors pass through unchanged.
pub async fn call_with_deadline<T, F>(
    operation: &'static str,
    deadline: Duration,
    future: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, future).await {
        Ok(result) => result,
        Err(_) => {
            let after_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
            warn!(operation, after_ms, "Deadline elapsed");
            Err(AppError::Timeout {
                operation,
                after_ms,
            })
        }
    }
}
