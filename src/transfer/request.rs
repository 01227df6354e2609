//! Transfer request types.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::blockchain::units::{TokenBalance, TokenUnit};
use crate::blockchain::BlockchainResult;

/// Why an amount string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is not a number")]
    NotANumber,

    #[error("Amount must be greater than zero")]
    NotPositive,
}

/// A positive decimal amount in human units, e.g. `12.5`.
///
/// Keeps the text as entered so conversion to raw units is exact.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    text: String,
    value: f64,
}

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_f64(&self) -> f64 {
        self.value
    }

    pub fn to_raw(&self, unit: TokenUnit) -> BlockchainResult<U256> {
        unit.to_raw(&self.text)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value: f64 = text.parse().map_err(|_| AmountError::NotANumber)?;

        if value.is_nan() {
            return Err(AmountError::NotANumber);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        // Plain decimal notation only: no sign, exponent, or inf.
        let plain = text.chars().all(|c| c.is_ascii_digit() || c == '.')
            && text.chars().filter(|c| *c == '.').count() <= 1
            && text.chars().any(|c| c.is_ascii_digit());
        if !plain {
            return Err(AmountError::NotANumber);
        }

        Ok(Self {
            text: text.to_string(),
            value,
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// What the user asked to send.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferAmount {
    /// The whole balance at query time.
    All,
    Exact(Amount),
}

/// The amount handed to the sender after the balance is known.
#[derive(Debug, Clone, PartialEq)]
pub enum SendAmount {
    Exact(Amount),
    /// Exactly the queried balance, in raw units.
    Balance(TokenBalance),
}

impl SendAmount {
    /// Raw on-chain amount for a token with the given unit.
    pub fn to_raw(&self, unit: TokenUnit) -> BlockchainResult<U256> {
        match self {
            SendAmount::Exact(amount) => amount.to_raw(unit),
            SendAmount::Balance(balance) => Ok(balance.raw),
        }
    }
}

impl fmt::Display for SendAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendAmount::Exact(amount) => write!(f, "{}", amount),
            SendAmount::Balance(balance) => write!(f, "{}", balance.as_f64()),
        }
    }
}

/// A validated transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub amount: TransferAmount,
    pub destination: Address,
    pub token_symbol: String,
}

impl TransferRequest {
    /// Resolve "send all" against the queried balance.
    pub fn send_amount(&self, balance: &TokenBalance) -> SendAmount {
        match &self.amount {
            TransferAmount::All => SendAmount::Balance(*balance),
            TransferAmount::Exact(amount) => SendAmount::Exact(amount.clone()),
        }
    }

    /// True when the requested amount is larger than the balance.
    ///
    /// This only drives a warning; the transfer is still attempted.
    pub fn exceeds(&self, balance: &TokenBalance) -> bool {
        match &self.amount {
            TransferAmount::All => false,
            TransferAmount::Exact(amount) => amount.as_f64() > balance.as_f64(),
        }
    }
}
