//! In-memory providers for unit tests.
use crate::logger::{Level, Logger};
use crate::options::{PackageRegistrySettings, RunOptions};
use crate::providers::{
    CommandExecutor, CommandOutput, EnvStore, Prompter, Providers, TokenPrompt,
};
use crate::registry::ProjectRegistry;
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;

pub fn registry() -> ProjectRegistry {
    serde_json::from_str(r#"{"projects":{"default":"acme-prod","staging":"acme-staging"}}"#)
        .expect("parse registry fixture")
}

pub fn run_options(project_key: &str) -> RunOptions {
    RunOptions {
        directory: PathBuf::from("/tmp/devsetup-test"),
        project_key: project_key.to_string(),
        env: "development".to_string(),
        registry: registry(),
        package_registry: PackageRegistrySettings::default(),
    }
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Exit { code: i32, stderr: String },
    Error(String),
}

impl MockResponse {
    pub fn exit(code: i32) -> Self {
        Self::Exit {
            code,
            stderr: String::new(),
        }
    }

    pub fn exit_with_stderr(code: i32, stderr: &str) -> Self {
        Self::Exit {
            code,
            stderr: stderr.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self::Error(message.to_string())
    }
}

/// Records every command; replays queued responses, then exits 0.
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: RefCell<VecDeque<MockResponse>>,
    calls: RefCell<Vec<String>>,
}

impl MockExecutor {
    pub fn push(&self, response: MockResponse) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn argv(&self) -> Vec<Vec<String>> {
        self.calls()
            .iter()
            .map(|call| shell_words::split(call).expect("split recorded command"))
            .collect()
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, command: &str) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.to_string());
        match self.responses.borrow_mut().pop_front() {
            None => Ok(CommandOutput {
                exit_code: Some(0),
                ..CommandOutput::default()
            }),
            Some(MockResponse::Exit { code, stderr }) => Ok(CommandOutput {
                exit_code: Some(code),
                stdout: String::new(),
                stderr,
            }),
            Some(MockResponse::Error(message)) => Err(anyhow!(message)),
        }
    }
}

#[derive(Debug)]
pub struct MockPrompter {
    answer: RefCell<Result<String, String>>,
    requests: RefCell<Vec<TokenPrompt>>,
}

impl Default for MockPrompter {
    fn default() -> Self {
        Self {
            answer: RefCell::new(Ok("token-from-prompt".to_string())),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl MockPrompter {
    pub fn answer(&self, token: &str) {
        *self.answer.borrow_mut() = Ok(token.to_string());
    }

    pub fn fail_with(&self, message: &str) {
        *self.answer.borrow_mut() = Err(message.to_string());
    }

    pub fn requests(&self) -> Vec<TokenPrompt> {
        self.requests.borrow().clone()
    }
}

impl Prompter for MockPrompter {
    fn prompt_token(&self, request: &TokenPrompt) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());
        self.answer.borrow().clone().map_err(|message| anyhow!(message))
    }
}

#[derive(Debug, Default)]
pub struct MemoryEnvStore {
    values: RefCell<BTreeMap<String, String>>,
    ignore_writes: RefCell<bool>,
    failure: RefCell<Option<String>>,
}

impl MemoryEnvStore {
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Accept writes without storing them, so read-back confirmation fails.
    pub fn ignore_writes(&self) {
        *self.ignore_writes.borrow_mut() = true;
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }
}

impl EnvStore for MemoryEnvStore {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(message) = self.failure.borrow().as_ref() {
            return Err(anyhow!(message.clone()));
        }
        if !*self.ignore_writes.borrow() {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }
}

#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: RefCell<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(line_level, _)| *line_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

/// One of each mock, kept around so tests can inspect them after a run.
#[derive(Default)]
pub struct Harness {
    pub executor: Rc<MockExecutor>,
    pub prompter: Rc<MockPrompter>,
    pub env_store: Rc<MemoryEnvStore>,
    pub logger: Rc<RecordingLogger>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn providers(&self) -> Providers {
        Providers {
            executor: self.executor.clone(),
            prompter: self.prompter.clone(),
            env_store: self.env_store.clone(),
            logger: self.logger.clone(),
        }
    }
}
