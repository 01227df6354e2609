//! Configuration schema definitions.
//!
//! The chains file maps a lowercase chain name to a [`ChainDescriptor`].
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// Root configuration: every chain the tool can send on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ChainsConfig {
    chains: BTreeMap<String, ChainDescriptor>,
}

impl ChainsConfig {
    /// Build a config from already-constructed descriptors, keyed by their names.
    pub fn from_chains(chains: impl IntoIterator<Item = ChainDescriptor>) -> Self {
        let chains = chains
            .into_iter()
            .map(|chain| (chain.name.clone(), chain))
            .collect();
        Self { chains }
    }

    /// Look up a chain by name. Input is trimmed and lowercased.
    pub fn chain(&self, name: &str) -> Option<&ChainDescriptor> {
        self.chains.get(&normalize_key(name))
    }

    /// Chain names in stable (sorted) order.
    pub fn chain_names(&self) -> Vec<&str> {
        self.chains.keys().map(String::as_str).collect()
    }

    pub fn chains(&self) -> impl Iterator<Item = &ChainDescriptor> {
        self.chains.values()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Copy each map key into the descriptor's `name` field.
    pub(crate) fn assign_names(&mut self) {
        for (name, chain) in self.chains.iter_mut() {
            chain.name = name.clone();
        }
    }
}

/// A supported EVM network and the token contracts known on it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainDescriptor {
    /// Chain name, taken from the config key.
    #[serde(skip)]
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Block explorer URL prefix (e.g. "https://etherscan.io/").
    pub explorer_url: String,

    /// Path to the token contract ABI file.
    #[serde(rename = "abi")]
    pub abi_path: PathBuf,

    /// Token symbol (lowercase) to contract address.
    pub tokens: BTreeMap<String, Address>,
}

impl ChainDescriptor {
    /// Contract address for a token symbol. Input is trimmed and lowercased.
    pub fn token_address(&self, symbol: &str) -> Option<Address> {
        self.tokens.get(&normalize_key(symbol)).copied()
    }

    pub fn supports_token(&self, symbol: &str) -> bool {
        self.token_address(symbol).is_some()
    }

    /// Token symbols in stable (sorted) order.
    pub fn token_symbols(&self) -> Vec<&str> {
        self.tokens.keys().map(String::as_str).collect()
    }

    /// Explorer link for a transaction.
    pub fn tx_url(&self, tx_hash: &TxHash) -> String {
        let base = self.explorer_url.trim_end_matches('/');
        format!("{}/tx/{}", base, tx_hash)
    }
}

/// Chain and token keys are matched case-insensitively.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
