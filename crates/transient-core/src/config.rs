use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while locating, reading, or validating the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot resolve config directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("config io at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid retry settings: {0}")]
    Invalid(String),
}

/// Retry policy parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Highest attempt count that may still be retried.
    pub max_attempts: u32,
    /// Envelope upper bound at attempt 0, in milliseconds.
    pub base_delay_ms: u64,
    /// Envelope growth per squared attempt, in milliseconds.
    pub step_delay_ms: u64,
    /// Cap on the envelope upper bound, in milliseconds.
    pub max_delay_ms: u64,
    /// Fixed jitter seed for reproducible delays. Unset = per-thread randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            base_delay_ms: 10,
            step_delay_ms: 10,
            max_delay_ms: 10_000,
            seed: None,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "max_delay_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Global configuration loaded from `~/.config/transient/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientConfig {
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl TransientConfig {
    /// Retry settings in effect: the `[retry]` section or the defaults.
    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("transient")?;
    xdg_dirs
        .place_config_file("config.toml")
        .map_err(|source| ConfigError::Io {
            path: xdg_dirs.get_config_home(),
            source,
        })
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TransientConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TransientConfig::default();
        write_to(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<TransientConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: TransientConfig = toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(retry) = &cfg.retry {
        retry.validate()?;
    }
    Ok(cfg)
}

pub fn write_to(path: &Path, cfg: &TransientConfig) -> Result<(), ConfigError> {
    let toml = toml::to_string_pretty(cfg)?;
    let io_err = |source: io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, toml).map_err(io_err)
}
