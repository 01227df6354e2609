//! Receipt polling state machine.
//!
//! # States
//! - Polling: waiting for the receipt, with elapsed "not found" time
//! - Confirmed(success | failure): receipt seen
//! - TimedOut: receipt still missing after the timeout
//!
//! # State Transitions
//! ```text
//! Polling → Polling:    no receipt, elapsed + interval <= timeout
//!                       receipt without a status field (elapsed unchanged)
//! Polling → TimedOut:   no receipt, elapsed + interval > timeout
//! Polling → Confirmed:  receipt status == 1 (success) or anything else (failure)
//! ```
//!
//! Only "not found" responses add to the elapsed time. Transport errors end the
//! wait with an error. There is no cancellation; the loop runs until a terminal
//! state.

use std::time::Duration;

use alloy::primitives::TxHash;
use tokio::time::sleep;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{BlockchainResult, ConfirmationResult, ReceiptInfo};

/// Poll timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between receipt queries.
    pub interval: Duration,
    /// Maximum accumulated "not found" time.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(100),
        }
    }
}

/// Poller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling { elapsed: Duration },
    Confirmed { success: bool },
    TimedOut,
}

impl PollState {
    pub fn initial() -> Self {
        PollState::Polling {
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling { .. })
    }

    /// Apply one receipt observation. Terminal states are absorbing.
    pub fn advance(self, receipt: Option<ReceiptInfo>, config: &PollConfig) -> Self {
        let elapsed = match self {
            PollState::Polling { elapsed } => elapsed,
            terminal => return terminal,
        };

        match receipt {
            None => {
                let elapsed = elapsed + config.interval;
                if elapsed > config.timeout {
                    PollState::TimedOut
                } else {
                    PollState::Polling { elapsed }
                }
            }
            Some(ReceiptInfo { status: None, .. }) => PollState::Polling { elapsed },
            Some(ReceiptInfo {
                status: Some(status),
                ..
            }) => PollState::Confirmed {
                success: status == ReceiptInfo::STATUS_SUCCESS,
            },
        }
    }

    /// Outcome for a terminal state.
    pub fn result(&self) -> Option<ConfirmationResult> {
        match self {
            PollState::Polling { .. } => None,
            PollState::Confirmed { success: true } => Some(ConfirmationResult::Success),
            PollState::Confirmed { success: false } => Some(ConfirmationResult::Failed),
            PollState::TimedOut => Some(ConfirmationResult::NotFoundTimeout),
        }
    }
}

/// Waits for a submitted transaction to reach a terminal state.
pub struct ConfirmationPoller<'a> {
    client: &'a dyn ChainClient,
    config: PollConfig,
}

impl<'a> ConfirmationPoller<'a> {
    pub fn new(client: &'a dyn ChainClient, config: PollConfig) -> Self {
        Self { client, config }
    }

    /// Poll until the receipt resolves or the timeout is exceeded.
    pub async fn wait(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationResult> {
        let mut state = PollState::initial();

        loop {
            let receipt = self.client.get_receipt(tx_hash).await?;
            state = state.advance(receipt, &self.config);

            if let Some(result) = state.result() {
                tracing::info!(tx_hash = %tx_hash, ?result, "Transaction wait finished");
                return Ok(result);
            }

            tracing::debug!(tx_hash = %tx_hash, ?state, "Transaction pending");
            sleep(self.config.interval).await;
        }
    }
}
