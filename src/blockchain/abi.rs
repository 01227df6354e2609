//! Token contract ABI loaded from the file named in the chain descriptor.
//!
//! Only `decimals`, `balanceOf` and `transfer` are used; all three must be
//! present or loading fails.

use std::path::Path;

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes, U256};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

#[derive(Debug, Clone)]
pub struct TokenAbi {
    decimals: Function,
    balance_of: Function,
    transfer: Function,
}

impl TokenAbi {
    /// Read and parse a JSON ABI file.
    pub fn load(path: &Path) -> BlockchainResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BlockchainError::Abi(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> BlockchainResult<Self> {
        let abi: JsonAbi = serde_json::from_str(content)
            .map_err(|e| BlockchainError::Abi(format!("malformed ABI: {}", e)))?;

        Ok(Self {
            decimals: find_function(&abi, "decimals")?,
            balance_of: find_function(&abi, "balanceOf")?,
            transfer: find_function(&abi, "transfer")?,
        })
    }

    pub fn encode_decimals(&self) -> BlockchainResult<Bytes> {
        encode(&self.decimals, &[])
    }

    pub fn decode_decimals(&self, output: &[u8]) -> BlockchainResult<u8> {
        let value = decode_uint(&self.decimals, output)?;
        if value > U256::from(u8::MAX) {
            return Err(BlockchainError::Abi(format!(
                "decimals() returned out-of-range value {}",
                value
            )));
        }
        Ok(value.to::<u8>())
    }

    pub fn encode_balance_of(&self, owner: Address) -> BlockchainResult<Bytes> {
        encode(&self.balance_of, &[DynSolValue::Address(owner)])
    }

    pub fn decode_balance_of(&self, output: &[u8]) -> BlockchainResult<U256> {
        decode_uint(&self.balance_of, output)
    }

    pub fn encode_transfer(&self, to: Address, amount: U256) -> BlockchainResult<Bytes> {
        encode(
            &self.transfer,
            &[DynSolValue::Address(to), DynSolValue::Uint(amount, 256)],
        )
    }
}

fn find_function(abi: &JsonAbi, name: &str) -> BlockchainResult<Function> {
    abi.function(name)
        .and_then(|overloads| overloads.first())
        .cloned()
        .ok_or_else(|| BlockchainError::Abi(format!("ABI has no '{}' function", name)))
}

fn encode(function: &Function, args: &[DynSolValue]) -> BlockchainResult<Bytes> {
    function
        .abi_encode_input(args)
        .map(Bytes::from)
        .map_err(|e| BlockchainError::Abi(format!("cannot encode {}: {}", function.name, e)))
}

fn decode_uint(function: &Function, output: &[u8]) -> BlockchainResult<U256> {
    let values = function
        .abi_decode_output(output)
        .map_err(|e| BlockchainError::Abi(format!("cannot decode {}: {}", function.name, e)))?;

    values
        .first()
        .and_then(DynSolValue::as_uint)
        .map(|(value, _)| value)
        .ok_or_else(|| {
            BlockchainError::Abi(format!("{} did not return an unsigned integer", function.name))
        })
}
