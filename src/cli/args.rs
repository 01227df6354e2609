//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::blockchain::PollConfig;
use crate::transfer::SenderSettings;

#[derive(Debug, Parser)]
#[command(name = "token-sender")]
#[command(about = "Send an ERC20 token on an EVM chain and wait for confirmation", long_about = None)]
pub struct Cli {
    /// Chains file (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = "chains.json")]
    pub config: PathBuf,

    /// Seconds between receipt queries
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_secs: u64,

    /// Seconds of "not found" receipts before giving up
    #[arg(long, default_value_t = 100)]
    pub timeout_secs: u64,

    /// Deadline for each RPC request, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub rpc_timeout_secs: u64,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Connection settings; the proxy comes from the interactive prompt.
    pub fn sender_settings(&self, proxy: Option<String>) -> SenderSettings {
        SenderSettings {
            proxy,
            rpc_timeout: Duration::from_secs(self.rpc_timeout_secs),
            poll: self.poll_config(),
        }
    }
}
