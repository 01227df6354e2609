//! Conversion between human-readable token amounts and raw on-chain units.

use std::fmt;

use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Named denomination for the decimals values the tool knows how to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenUnit {
    /// 6 decimals.
    Micro,
    /// 9 decimals.
    Nano,
    /// 18 decimals.
    Base,
}

impl TokenUnit {
    /// Unit for a token's `decimals()` value. Anything other than 6, 9 or 18 is
    /// rejected rather than converted with a guessed scale.
    pub fn from_decimals(decimals: u8) -> BlockchainResult<Self> {
        match decimals {
            6 => Ok(TokenUnit::Micro),
            9 => Ok(TokenUnit::Nano),
            18 => Ok(TokenUnit::Base),
            other => Err(BlockchainError::UnsupportedDecimals(other)),
        }
    }

    /// Ethereum unit name used for the conversion.
    pub fn name(self) -> &'static str {
        match self {
            TokenUnit::Micro => "mwei",
            TokenUnit::Nano => "gwei",
            TokenUnit::Base => "ether",
        }
    }

    pub fn decimals(self) -> u8 {
        match self {
            TokenUnit::Micro => 6,
            TokenUnit::Nano => 9,
            TokenUnit::Base => 18,
        }
    }

    /// Convert a plain decimal string (e.g. "12.5") to raw units.
    ///
    /// More significant fractional digits than the unit holds is an error;
    /// trailing zeros are fine.
    pub fn to_raw(self, amount: &str) -> BlockchainResult<U256> {
        let fraction = amount.split_once('.').map_or("", |(_, f)| f);
        let significant = fraction.trim_end_matches('0').len();
        if significant > usize::from(self.decimals()) {
            return Err(BlockchainError::InvalidAmount {
                amount: amount.to_string(),
                reason: format!(
                    "more than {} decimal places for a {} token",
                    self.decimals(),
                    self.name()
                ),
            });
        }

        let parsed = parse_units(amount, self.name()).map_err(|e| BlockchainError::InvalidAmount {
            amount: amount.to_string(),
            reason: e.to_string(),
        })?;
        Ok(parsed.get_absolute())
    }
}

/// A token balance as returned by `balanceOf`, with the token's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    pub raw: U256,
    pub decimals: u8,
}

impl TokenBalance {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Balance reported for tokens the chain does not list.
    pub fn zero() -> Self {
        Self {
            raw: U256::ZERO,
            decimals: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Human-readable value, `raw / 10^decimals`.
    pub fn as_f64(&self) -> f64 {
        let raw: f64 = self.raw.to_string().parse().unwrap_or(f64::MAX);
        raw / 10f64.powi(i32::from(self.decimals))
    }
}

impl fmt::Display for TokenBalance {
    /// Three decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.as_f64())
    }
}
