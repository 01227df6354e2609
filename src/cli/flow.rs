//! Top-level transfer flow.

use crate::blockchain::{ConfirmationResult, SubmittedTransaction};
use crate::cli::args::Cli;
use crate::cli::input::collect_choices;
use crate::cli::prompt::Prompter;
use crate::cli::CliError;
use crate::config::load_config;
use crate::transfer::{Sender, TransferRequest};

/// How a run ended, when it did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The token is not listed for the chain; nothing was submitted.
    NotSent,
    Completed {
        submitted: SubmittedTransaction,
        result: ConfirmationResult,
    },
}

/// Load config, prompt, connect, then [`execute`].
pub async fn run(cli: &Cli, prompter: &mut dyn Prompter) -> Result<TransferOutcome, CliError> {
    let config = load_config(&cli.config)?;
    let choices = collect_choices(prompter, &config)?;

    let settings = cli.sender_settings(choices.proxy);
    let sender = Sender::connect(&choices.private_key, choices.chain, &settings)?;

    tracing::info!(
        chain = %sender.chain().name,
        from = %sender.address(),
        to = %choices.request.destination,
        token = %choices.request.token_symbol,
        "Starting transfer"
    );

    execute(&sender, &choices.request).await
}

/// Balance query, send, and confirmation wait for one request.
///
/// An amount above the balance only prints a warning; the transfer is still
/// submitted with the requested amount and the chain decides.
pub async fn execute(
    sender: &Sender,
    request: &TransferRequest,
) -> Result<TransferOutcome, CliError> {
    let token = &request.token_symbol;

    let balance = sender.get_token_balance(token).await?;
    println!("Balance: {} {}", balance, token);

    let amount = request.send_amount(&balance);

    if request.exceeds(&balance) {
        tracing::warn!(token = %token, %balance, requested = %amount, "Amount exceeds balance");
        println!("There are insufficient {} in your account", token);
    }

    let Some(submitted) = sender.send(&amount, request.destination, token).await? else {
        println!("Transaction not sent, try again");
        return Ok(TransferOutcome::NotSent);
    };

    println!("Transaction sent: {}", submitted.transaction_hash);

    let result = sender.wait_tx(submitted.transaction_hash).await?;
    Ok(TransferOutcome::Completed { submitted, result })
}
