//! Retry decision seam handed to storage providers and transport wrappers.

use crate::retry::error::FaultError;
use crate::retry::policy::{RetryDecision, RetryPolicy, StopReason};

/// Decides, after a failed attempt, whether and when to try again.
///
/// The caller owns the attempt counter and the retry loop; implementations
/// only answer the question.
pub trait ShouldRetry: Send + Sync {
    fn should_retry(&self, attempt: u32, error: &FaultError) -> RetryDecision;
}

impl ShouldRetry for RetryPolicy {
    fn should_retry(&self, attempt: u32, error: &FaultError) -> RetryDecision {
        self.evaluate(attempt, error)
    }
}

impl<F> ShouldRetry for F
where
    F: Fn(u32, &FaultError) -> RetryDecision + Send + Sync,
{
    fn should_retry(&self, attempt: u32, error: &FaultError) -> RetryDecision {
        self(attempt, error)
    }
}

/// Never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl ShouldRetry for NoRetry {
    fn should_retry(&self, _attempt: u32, _error: &FaultError) -> RetryDecision {
        RetryDecision::Stop(StopReason::Permanent)
    }
}
