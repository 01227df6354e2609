//! ERC20 token sender.
//!
//! # Flow
//!
//! ```text
//!   chains.json ──▶ config ──▶ prompts (key, proxy, to, chain, token, amount)
//!                                   │
//!                                   ▼
//!                     ┌─────────────────────────────┐
//!                     │           Sender            │
//!                     │  balance ─▶ send ─▶ wait_tx │
//!                     └──────────────┬──────────────┘
//!                                    │ ChainClient (alloy HTTP, optional proxy)
//!                                    ▼
//!                               EVM JSON-RPC
//! ```
//!
//! Any error ends the run with a single "Transfer failed" line; the process
//! still exits normally.

use clap::Parser;

use token_sender::cli::{self, Cli, TerminalPrompter};
use token_sender::observability::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    tracing::info!(config = %cli.config.display(), "token-sender v0.1.0 starting");

    let mut prompter = TerminalPrompter;
    match cli::run(&cli, &mut prompter).await {
        Ok(outcome) => tracing::debug!(?outcome, "Run finished"),
        Err(e) => {
            tracing::error!(error = %e, "Transfer aborted");
            println!("Transfer failed: {}", e);
        }
    }
}
