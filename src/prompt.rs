//! User input and interaction handling.
//! The resolver talks to the user only through the [`Prompter`] trait so that the
//! interactive terminal can be swapped for scripted answers.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Password, Select};

/// Source of answers for prompted variables.
///
/// Implementations return whatever the user submitted; required-value and number checks
/// are applied by the resolver, which asks again when an answer is rejected.
pub trait Prompter {
    /// Asks for free text, offering `default` when it is non-empty.
    fn text(&self, message: &str, default: &str) -> Result<String>;

    /// Asks for hidden text.
    fn password(&self, message: &str) -> Result<String>;

    /// Asks for a yes/no answer.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Asks to pick one of `options`, highlighting `initial` first. Returns the index of
    /// the picked option.
    fn select(&self, message: &str, options: &[String], initial: usize) -> Result<usize>;
}

/// Interactive terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::PromptError(e.to_string())
}

impl Prompter for DialoguerPrompter {
    fn text(&self, message: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(message).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn password(&self, message: &str) -> Result<String> {
        Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new().with_prompt(message).default(default).interact().map_err(prompt_error)
    }

    fn select(&self, message: &str, options: &[String], initial: usize) -> Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(options)
            .default(initial)
            .interact()
            .map_err(prompt_error)
    }
}
