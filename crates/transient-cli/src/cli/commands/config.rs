//! `transient config` – show where settings come from and what is in effect.

use anyhow::Result;
use std::path::Path;
use transient_core::config::{self, TransientConfig};

pub fn run_config(cfg: &TransientConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    let retry = cfg.retry_or_default();
    println!("config: {}", path.display());
    if cfg.retry.is_none() {
        println!("[retry] section absent; using defaults");
    }
    print!("{}", toml::to_string_pretty(&retry)?);
    Ok(())
}
