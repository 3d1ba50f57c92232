//! Capabilities the setup steps delegate to.
//!
//! Steps only see these traits. `Providers` bundles one implementation of
//! each and is handed to the sequence builders, so tests can swap any of
//! them for an in-memory double.
mod env_file;
mod exec;
mod prompt;

pub use env_file::DotenvFile;
pub use exec::ShellExecutor;
pub use prompt::TerminalPrompter;

use crate::logger::Logger;
use anyhow::Result;
use std::rc::Rc;

/// Exit status and captured output of one external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a command line and reports how it exited.
///
/// `Err` means the command could not be run at all; a nonzero exit is a
/// normal `Ok` outcome.
pub trait CommandExecutor {
    fn execute(&self, command: &str) -> Result<CommandOutput>;
}

/// Build a command line that `CommandExecutor` splits back losslessly.
pub fn command_line(args: &[&str]) -> String {
    shell_words::join(args)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPrompt {
    pub label: String,
    /// Accepted when the user just presses enter. Never echoed.
    pub default: Option<String>,
}

pub trait Prompter {
    fn prompt_token(&self, request: &TokenPrompt) -> Result<String>;
}

/// Environment-style key/value storage.
pub trait EnvStore {
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn get(&self, key: &str) -> Result<Option<String>>;
}

#[derive(Clone)]
pub struct Providers {
    pub executor: Rc<dyn CommandExecutor>,
    pub prompter: Rc<dyn Prompter>,
    pub env_store: Rc<dyn EnvStore>,
    pub logger: Rc<dyn Logger>,
}
