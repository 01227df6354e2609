//! Line-oriented prompts.
//!
//! [`Prompter`] returns raw answers; validation and re-prompting live in
//! `input.rs` so they can run against scripted answers in tests.

use dialoguer::{Input, Password};

use crate::cli::CliError;

pub trait Prompter {
    /// Ask for a value that must not be echoed.
    fn secret(&mut self, prompt: &str) -> Result<String, CliError>;

    /// Ask for a line of text. Empty answers are allowed.
    fn text(&mut self, prompt: &str) -> Result<String, CliError>;
}

/// Interactive terminal prompts.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn secret(&mut self, prompt: &str) -> Result<String, CliError> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| CliError::Prompt(e.to_string()))
    }

    fn text(&mut self, prompt: &str) -> Result<String, CliError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CliError::Prompt(e.to_string()))
    }
}
