//! Interactive command-line front end.
//!
//! # Data Flow
//! ```text
//! args.rs (clap flags)
//!     → prompt.rs (raw answers)
//!     → input.rs (validation, re-prompt loops)
//!     → flow.rs (balance → send → wait, user-facing output)
//! ```

pub mod args;
pub mod flow;
pub mod input;
pub mod prompt;

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::ConfigError;

pub use args::Cli;
pub use flow::{execute, run, TransferOutcome};
pub use prompt::{Prompter, TerminalPrompter};

/// Errors that end a run. Printed once by `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}
