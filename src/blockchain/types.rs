//! Chain-specific types and error definitions.

use alloy::primitives::{Bytes, TxHash, U256};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// ABI file missing, malformed, or a call could not be encoded/decoded.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Token reports a decimals value with no known unit.
    #[error("Can't find unit for decimals: {0}")]
    UnsupportedDecimals(u8),

    /// Amount could not be converted to on-chain units.
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// Signed transaction was rejected by the node.
    #[error("Transaction submission failed: {0}")]
    Submission(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Fee quote returned by the node: base fee and suggested priority fee, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEstimate {
    pub base_fee: u128,
    pub max_priority_fee: u128,
}

/// Fee-market fields for one transaction. Built fresh for every send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeParameters {
    pub base_fee: u128,
    pub max_priority_fee: u128,
    /// Always `base_fee + max_priority_fee`.
    pub max_fee: u128,
    pub nonce: u64,
    pub chain_id: ChainId,
}

impl FeeParameters {
    pub fn new(estimate: FeeEstimate, nonce: u64, chain_id: ChainId) -> Self {
        Self {
            base_fee: estimate.base_fee,
            max_priority_fee: estimate.max_priority_fee,
            max_fee: estimate.base_fee.saturating_add(estimate.max_priority_fee),
            nonce,
            chain_id,
        }
    }
}

/// A signed transfer that has been accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    /// EIP-2718 encoded signed transaction.
    pub raw_signed_bytes: Bytes,
    pub transaction_hash: TxHash,
    /// Token amount in raw on-chain units.
    pub amount: U256,
    pub fees: FeeParameters,
}

/// The subset of a transaction receipt the poller cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptInfo {
    /// Execution status; `None` when the node returned no status field.
    pub status: Option<u64>,
    pub block_number: Option<u64>,
}

impl ReceiptInfo {
    /// Receipt status value that marks successful execution.
    pub const STATUS_SUCCESS: u64 = 1;

    pub fn success(block_number: u64) -> Self {
        Self {
            status: Some(Self::STATUS_SUCCESS),
            block_number: Some(block_number),
        }
    }

    pub fn failed(block_number: u64) -> Self {
        Self {
            status: Some(0),
            block_number: Some(block_number),
        }
    }
}

/// Terminal outcome of waiting for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    /// Included with the success status.
    Success,
    /// Included with any other status.
    Failed,
    /// Receipt never appeared within the timeout.
    NotFoundTimeout,
}
