//! `transient evaluate` – classify a failure and print the retry decision.

use anyhow::Result;
use serde::Serialize;
use transient_core::config::TransientConfig;
use transient_core::retry::{classify, FailureClass, FaultError, RetryPolicy, StopReason};

#[derive(Debug, Serialize)]
pub struct Evaluation {
    pub attempt: u32,
    pub error: String,
    pub class: FailureClass,
    pub should_retry: bool,
    pub delay_ms: u64,
    pub stop_reason: Option<StopReason>,
    pub envelope_ms: u64,
}

pub fn evaluate_fault(policy: &RetryPolicy, attempt: u32, error: &FaultError) -> Evaluation {
    let decision = policy.evaluate(attempt, error);
    Evaluation {
        attempt,
        error: error.to_string(),
        class: classify(error),
        should_retry: decision.should_retry(),
        delay_ms: decision.delay().as_millis() as u64,
        stop_reason: decision.stop_reason(),
        envelope_ms: policy.delay_ceiling(attempt).as_millis() as u64,
    }
}

pub fn run_evaluate(
    cfg: &TransientConfig,
    attempt: u32,
    error: &FaultError,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut policy = RetryPolicy::from_config(&cfg.retry_or_default());
    if let Some(seed) = seed {
        policy = policy.with_seed(seed);
    }
    let eval = evaluate_fault(&policy, attempt, error);

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
        return Ok(());
    }

    println!("error:    {}", eval.error);
    println!("class:    {}", eval.class);
    match eval.stop_reason {
        None => println!(
            "decision: retry after {}ms (envelope [0, {})ms)",
            eval.delay_ms, eval.envelope_ms
        ),
        Some(StopReason::Permanent) => println!("decision: stop (not retriable)"),
        Some(StopReason::Exhausted) => println!(
            "decision: stop (retries exhausted after attempt {})",
            policy.max_attempts
        ),
    }
    Ok(())
}
