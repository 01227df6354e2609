//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Private key (prompt)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts, optional proxy)
//!     → abi.rs + units.rs (token calls, amount conversion)
//!     → transaction.rs (fees, build, sign, broadcast)
//!     → confirmation.rs (receipt polling)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod abi;
pub mod client;
pub mod confirmation;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use abi::TokenAbi;
pub use client::{ChainClient, RpcChainClient};
pub use confirmation::{ConfirmationPoller, PollConfig, PollState};
pub use transaction::TxBuilder;
pub use types::{
    BlockchainError, BlockchainResult, ChainId, ConfirmationResult, FeeEstimate, FeeParameters,
    ReceiptInfo, SubmittedTransaction,
};
pub use units::{TokenBalance, TokenUnit};
pub use wallet::Wallet;
