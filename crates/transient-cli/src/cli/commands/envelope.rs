//! `transient envelope` – print the delay envelope per attempt.

use anyhow::{bail, Result};
use transient_core::config::TransientConfig;
use transient_core::retry::RetryPolicy;

pub fn run_envelope(cfg: &TransientConfig, from: u32, to: u32) -> Result<()> {
    if from > to {
        bail!("--from ({from}) must not exceed --to ({to})");
    }
    let policy = RetryPolicy::from_config(&cfg.retry_or_default());
    println!("{:<8} {:<12} {}", "ATTEMPT", "MAX_DELAY", "RETRY");
    for attempt in from..=to {
        let retry = if attempt > policy.max_attempts { "no" } else { "yes" };
        println!(
            "{:<8} {:<12} {}",
            attempt,
            format!("{}ms", policy.delay_ceiling(attempt).as_millis()),
            retry
        );
    }
    Ok(())
}
