use crate::config::RetryConfig;
use crate::retry::classify::{classify, is_transient};
use crate::retry::error::FaultError;
use crate::retry::jitter::Jitter;
use serde::Serialize;
use std::time::Duration;

/// Why the policy declined to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// The fault is not transient; retrying cannot help.
    Permanent,
    /// The fault is transient but the attempt ceiling was passed.
    Exhausted,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the given delay.
    Retry(Duration),
    /// Do not retry.
    Stop(StopReason),
}

impl RetryDecision {
    pub fn should_retry(&self) -> bool {
        matches!(self, RetryDecision::Retry(_))
    }

    /// Delay before the next attempt; zero when not retrying.
    pub fn delay(&self) -> Duration {
        match self {
            RetryDecision::Retry(d) => *d,
            RetryDecision::Stop(_) => Duration::ZERO,
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            RetryDecision::Retry(_) => None,
            RetryDecision::Stop(reason) => Some(*reason),
        }
    }
}

/// Jittered quadratic backoff with an attempt ceiling.
///
/// The delay for attempt `n` is drawn uniformly from
/// `[0, min(max_delay, base_delay + n^2 * step_delay))`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Highest attempt count that may still be retried.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub step_delay: Duration,
    /// Upper bound on the backoff envelope.
    pub max_delay: Duration,
    pub jitter: Jitter,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            base_delay: Duration::from_millis(10),
            step_delay: Duration::from_millis(10),
            max_delay: Duration::from_secs(10),
            jitter: Jitter::ThreadLocal,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts,
            base_delay: Duration::from_millis(cfg.base_delay_ms),
            step_delay: Duration::from_millis(cfg.step_delay_ms),
            max_delay: Duration::from_millis(cfg.max_delay_ms),
            jitter: cfg.seed.map(Jitter::seeded).unwrap_or_default(),
        }
    }

    /// Same policy with a reproducible jitter sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.jitter = Jitter::seeded(seed);
        self
    }

    /// Exclusive upper bound of the delay envelope for `attempt`.
    pub fn delay_ceiling(&self, attempt: u32) -> Duration {
        let n = u64::from(attempt);
        let step = millis(self.step_delay).saturating_mul(n.saturating_mul(n));
        let raw = millis(self.base_delay).saturating_add(step);
        Duration::from_millis(raw.min(millis(self.max_delay)))
    }

    /// Decide for a fault already known to be transient or permanent.
    pub fn decide(&self, attempt: u32, transient: bool) -> RetryDecision {
        if !transient {
            return RetryDecision::Stop(StopReason::Permanent);
        }
        if attempt > self.max_attempts {
            return RetryDecision::Stop(StopReason::Exhausted);
        }
        let upper = millis(self.delay_ceiling(attempt));
        RetryDecision::Retry(Duration::from_millis(self.jitter.draw_below(upper)))
    }

    /// Classify `e` and decide whether attempt `attempt` should be retried.
    pub fn evaluate(&self, attempt: u32, e: &FaultError) -> RetryDecision {
        let class = classify(e);
        let decision = self.decide(attempt, is_transient(class, e));
        match decision {
            RetryDecision::Retry(delay) => {
                tracing::debug!(attempt, %class, delay_ms = delay.as_millis() as u64, "retrying transient fault");
            }
            RetryDecision::Stop(StopReason::Exhausted) => {
                tracing::info!(attempt, %class, "retries exhausted: {}", e);
            }
            RetryDecision::Stop(StopReason::Permanent) => {
                tracing::debug!(attempt, %class, "non-retriable fault: {}", e);
            }
        }
        decision
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
