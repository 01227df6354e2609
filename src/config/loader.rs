//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ChainsConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// On-disk format of the chains file, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load and validate the chains file. `.toml` files are read as TOML,
/// everything else as JSON.
pub fn load_config(path: &Path) -> Result<ChainsConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let config = parse_config(&content, ConfigFormat::from_path(path))?;

    tracing::debug!(
        path = %path.display(),
        chains = ?config.chain_names(),
        "Chains configuration loaded"
    );

    Ok(config)
}

/// Parse and validate chains configuration from a string.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ChainsConfig, ConfigError> {
    let mut config: ChainsConfig = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    config.assign_names();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CHAINS_JSON: &str = r#"{
        "arbitrum": {
            "rpc_url": "https://arb1.arbitrum.io/rpc",
            "explorer_url": "https://arbiscan.io/",
            "abi": "abi/erc20.json",
            "tokens": {
                "usdc": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
                "usdt": "0xFd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"
            }
        },
        "base": {
            "rpc_url": "https://mainnet.base.org",
            "explorer_url": "https://basescan.org/",
            "abi": "abi/erc20.json",
            "tokens": {
                "usdc": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
            }
        }
    }"#;

    #[test]
    fn test_parse_json_assigns_names() {
        let config = parse_config(CHAINS_JSON, ConfigFormat::Json).unwrap();
        assert_eq!(config.chain_names(), vec!["arbitrum", "base"]);

        let arbitrum = config.chain("arbitrum").unwrap();
        assert_eq!(arbitrum.name, "arbitrum");
        assert_eq!(arbitrum.token_symbols(), vec!["usdc", "usdt"]);
    }

    #[test]
    fn test_missing_field_fails_fast() {
        let content = r#"{ "base": { "rpc_url": "https://mainnet.base.org", "abi": "a.json", "tokens": {} } }"#;
        let err = parse_config(content, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("explorer_url"));
    }

    #[test]
    fn test_bad_token_address_rejected() {
        let content = r#"{ "base": {
            "rpc_url": "https://mainnet.base.org",
            "explorer_url": "https://basescan.org/",
            "abi": "a.json",
            "tokens": { "usdc": "not-an-address" }
        } }"#;
        assert!(matches!(
            parse_config(content, ConfigFormat::Json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
            [polygon]
            rpc_url = "https://polygon-rpc.com"
            explorer_url = "https://polygonscan.com/"
            abi = "abi/erc20.json"

            [polygon.tokens]
            usdt = "0xc2132D05D31c914a87C6611C10748AEb04B58e8F"
        "#;
        let config = parse_config(content, ConfigFormat::Toml).unwrap();
        assert!(config.chain("polygon").unwrap().supports_token("usdt"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("chains.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("chains.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("chains")), ConfigFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(CHAINS_JSON.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.chain("base").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/chains.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
