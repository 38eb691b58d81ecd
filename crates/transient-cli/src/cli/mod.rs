//! CLI for inspecting transient-fault retry decisions.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use transient_core::config::{self, TransientConfig};
use transient_core::retry::{FaultError, TransportError, TransportStatus};

use commands::{run_config, run_envelope, run_evaluate, run_kinds};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "transient")]
#[command(about = "Classify remote-call failures and show retry decisions", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/transient/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Classify a failure and show whether and when it would be retried.
    Evaluate {
        /// Attempt counter supplied by the retry loop.
        #[arg(long, default_value = "0", value_name = "N")]
        attempt: u32,

        #[command(flatten)]
        fault: FaultArgs,

        /// Wrap the failure in a single-cause aggregate.
        #[arg(long)]
        aggregate: bool,

        /// Fixed jitter seed (overrides the config file).
        #[arg(long)]
        seed: Option<u64>,

        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the backoff envelope for a range of attempts.
    Envelope {
        /// First attempt to show.
        #[arg(long, default_value = "0")]
        from: u32,
        /// Last attempt to show (inclusive).
        #[arg(long, default_value = "35")]
        to: u32,
    },

    /// List transport statuses and whether each is retried.
    Kinds,

    /// Show the config file path and effective retry settings.
    Config,
}

/// The failure to evaluate; exactly one must be given.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
#[group(required = true, multiple = false)]
pub struct FaultArgs {
    /// HTTP status code returned by the server.
    #[arg(long, value_name = "CODE")]
    pub http: Option<u16>,

    /// Transport status, e.g. timeout or connect-failure.
    #[arg(long, value_name = "KIND")]
    pub transport: Option<TransportStatus>,

    /// Local I/O failure.
    #[arg(long)]
    pub io: bool,

    /// Any other error message.
    #[arg(long, value_name = "MESSAGE")]
    pub other: Option<String>,
}

impl FaultArgs {
    pub fn to_fault(&self) -> FaultError {
        if let Some(code) = self.http {
            return FaultError::http(code);
        }
        if let Some(status) = self.transport {
            return FaultError::transport(TransportError::new(status));
        }
        if self.io {
            return FaultError::from(std::io::Error::new(
                std::io::ErrorKind::Other,
                "local I/O failure",
            ));
        }
        FaultError::other(self.other.clone().unwrap_or_default())
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Evaluate {
                attempt,
                fault,
                aggregate,
                seed,
                json,
            } => {
                let mut error = fault.to_fault();
                if aggregate {
                    error = FaultError::aggregate(vec![error]);
                }
                run_evaluate(&cfg, attempt, &error, seed, json)?;
            }
            CliCommand::Envelope { from, to } => run_envelope(&cfg, from, to)?,
            CliCommand::Kinds => run_kinds(),
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<TransientConfig> {
    let cfg = match path {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    Ok(cfg)
}
