//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs (RPC endpoint, explorer prefix)
//! - Check token tables are non-empty and keyed by lowercase symbols
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ChainsConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::{ChainDescriptor, ChainsConfig};

/// A single semantic problem found in the chains file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no chains configured")]
    NoChains,

    #[error("chain '{0}': name must be lowercase")]
    ChainNameCase(String),

    #[error("chain '{chain}': invalid {field} '{value}': {reason}")]
    InvalidUrl {
        chain: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("chain '{0}': abi path is empty")]
    EmptyAbiPath(String),

    #[error("chain '{0}': no tokens configured")]
    NoTokens(String),

    #[error("chain '{chain}': token symbol '{symbol}' must be lowercase")]
    TokenSymbolCase { chain: String, symbol: String },
}

/// Validate every chain in the config, collecting all problems.
pub fn validate_config(config: &ChainsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.is_empty() {
        errors.push(ValidationError::NoChains);
    }

    for chain in config.chains() {
        validate_chain(chain, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_chain(chain: &ChainDescriptor, errors: &mut Vec<ValidationError>) {
    let name = &chain.name;

    if *name != name.trim().to_lowercase() {
        errors.push(ValidationError::ChainNameCase(name.clone()));
    }

    if let Err(reason) = check_http_url(&chain.rpc_url) {
        errors.push(ValidationError::InvalidUrl {
            chain: name.clone(),
            field: "rpc_url",
            value: chain.rpc_url.clone(),
            reason,
        });
    }

    if let Err(reason) = check_http_url(&chain.explorer_url) {
        errors.push(ValidationError::InvalidUrl {
            chain: name.clone(),
            field: "explorer_url",
            value: chain.explorer_url.clone(),
            reason,
        });
    }

    if chain.abi_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyAbiPath(name.clone()));
    }

    if chain.tokens.is_empty() {
        errors.push(ValidationError::NoTokens(name.clone()));
    }

    for symbol in chain.tokens.keys() {
        if *symbol != symbol.trim().to_lowercase() {
            errors.push(ValidationError::TokenSymbolCase {
                chain: name.clone(),
                symbol: symbol.clone(),
            });
        }
    }
}

fn check_http_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
