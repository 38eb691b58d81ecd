//! CLI command handlers. Each command is in its own file.

mod config;
mod envelope;
mod evaluate;
mod kinds;

pub use config::run_config;
pub use envelope::run_envelope;
#[cfg(test)]
pub use evaluate::evaluate_fault;
pub use evaluate::run_evaluate;
pub use kinds::run_kinds;
