//! Bounded retry with per-call timeout and jittered exponential backoff.

use gist_core::config::RetryConfig;
use gist_core::{GistError, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `op` until it succeeds or `policy.max_attempts` calls have failed or timed out.
pub async fn with_retry<T, F, Fut>(policy: &RetryConfig, label: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let timeout = Duration::from_millis(policy.call_timeout_ms);
    let mut last_error = String::new();

    for attempt in 1..=policy.max_attempts {
        match tokio::time::timeout(timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => last_error = e.to_string(),
            Err(_) => last_error = format!("timed out after {}ms", policy.call_timeout_ms),
        }
        warn!(call = label, attempt, max_attempts = policy.max_attempts, error = %last_error, "model call failed");
        if attempt < policy.max_attempts {
            tokio::time::sleep(backoff_delay(policy, attempt)).await;
        }
    }

    Err(GistError::RetriesExhausted { attempts: policy.max_attempts, reason: last_error })
}

/// `base * 2^(attempt-1)` plus up to half a base delay of jitter.
pub fn backoff_delay(policy: &RetryConfig, attempt: u32) -> Duration {
    let base = policy.base_delay_ms;
    let exp = base.saturating_mul(1u64 << attempt.saturating_sub(1).min(16));
    let jitter = if base >= 2 { rand::thread_rng().gen_range(0..=base / 2) } else { 0 };
    Duration::from_millis(exp.saturating_add(jitter))
}
