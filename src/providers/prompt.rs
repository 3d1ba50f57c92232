use super::{Prompter, TokenPrompt};
use anyhow::{Context, Result};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Password};

/// Interactive prompt on the controlling terminal.
///
/// Input is masked and never echoed back. Without a terminal (CI, piped
/// stderr) the default is returned as-is.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt_token(&self, request: &TokenPrompt) -> Result<String> {
        if !Term::stderr().is_term() {
            tracing::debug!("stderr is not a terminal, using default token");
            return Ok(request.default.clone().unwrap_or_default());
        }

        let theme = ColorfulTheme::default();
        let answer = Password::with_theme(&theme)
            .with_prompt(prompt_label(request))
            .allow_empty_password(true)
            .interact()
            .context("read token from terminal")?;
        Ok(answer_or_default(answer, request.default.as_deref()))
    }
}

fn prompt_label(request: &TokenPrompt) -> String {
    match request.default {
        Some(_) => format!("{} (enter keeps the current token)", request.label),
        None => request.label.clone(),
    }
}

/// `Password` has no default of its own; an empty answer falls back here.
fn answer_or_default(answer: String, default: Option<&str>) -> String {
    match default {
        Some(default) if answer.trim().is_empty() => default.to_string(),
        _ => answer,
    }
}
