//! Validation of interactive answers.
//!
//! Each `parse_*` function is pure; [`collect_choices`] asks in order and
//! re-prompts until every answer validates.

use alloy::primitives::Address;
use thiserror::Error;

use crate::cli::prompt::Prompter;
use crate::cli::CliError;
use crate::config::{ChainDescriptor, ChainsConfig};
use crate::transfer::{Amount, AmountError, TransferAmount, TransferRequest};

/// A rejected answer. Shown to the user, then the question is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown chain '{0}'")]
    UnknownChain(String),

    #[error("Unknown token '{0}'")]
    UnknownToken(String),

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Everything gathered from the user before any network access.
pub struct UserChoices {
    pub private_key: String,
    pub proxy: Option<String>,
    pub chain: ChainDescriptor,
    pub request: TransferRequest,
}

pub fn parse_proxy(input: &str) -> Option<String> {
    let proxy = input.trim();
    (!proxy.is_empty()).then(|| proxy.to_string())
}

pub fn parse_destination(input: &str) -> Result<Address, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| InputError::InvalidAddress(trimmed.to_string()))
}

pub fn parse_chain<'a>(
    config: &'a ChainsConfig,
    input: &str,
) -> Result<&'a ChainDescriptor, InputError> {
    config
        .chain(input)
        .ok_or_else(|| InputError::UnknownChain(input.trim().to_lowercase()))
}

/// Returns the normalized (lowercase) symbol.
pub fn parse_token(chain: &ChainDescriptor, input: &str) -> Result<String, InputError> {
    let symbol = input.trim().to_lowercase();
    if chain.supports_token(&symbol) {
        Ok(symbol)
    } else {
        Err(InputError::UnknownToken(symbol))
    }
}

/// Any answer containing "yes" means send the whole balance.
pub fn parse_send_all(input: &str) -> bool {
    input.trim().to_lowercase().contains("yes")
}

pub fn parse_amount(input: &str) -> Result<Amount, InputError> {
    Ok(input.parse::<Amount>()?)
}

/// Ask `prompt` until `parse` accepts the answer.
pub fn ask_until<T, F>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    mut parse: F,
) -> Result<T, CliError>
where
    F: FnMut(&str) -> Result<T, InputError>,
{
    loop {
        let answer = prompter.text(prompt)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected answer");
                println!("{}", e);
            }
        }
    }
}

/// Run the prompts in order: private key, proxy, destination, chain, token,
/// send-all, amount.
pub fn collect_choices(
    prompter: &mut dyn Prompter,
    config: &ChainsConfig,
) -> Result<UserChoices, CliError> {
    let private_key = prompter.secret("Enter private key")?;
    let proxy = parse_proxy(&prompter.text("Enter proxy (host:port, empty for none)")?);
    let destination = ask_until(prompter, "Enter address to", parse_destination)?;

    let chain = ask_until(
        prompter,
        &format!("Choose chain {:?}", config.chain_names()),
        |input| parse_chain(config, input),
    )?
    .clone();

    let token_symbol = ask_until(
        prompter,
        &format!("Choose token {:?}", chain.token_symbols()),
        |input| parse_token(&chain, input),
    )?;

    let send_all = parse_send_all(&prompter.text(&format!(
        "Do you want to send all {}? Enter 'yes' or 'no'",
        token_symbol
    ))?);

    let amount = if send_all {
        TransferAmount::All
    } else {
        TransferAmount::Exact(ask_until(
            prompter,
            &format!("Enter amount of {}", token_symbol),
            parse_amount,
        )?)
    };

    Ok(UserChoices {
        private_key,
        proxy,
        chain,
        request: TransferRequest {
            amount,
            destination,
            token_symbol,
        },
    })
}
