//! Uniform outcome of a setup step.
//!
//! Every step, and the runner itself, reports through `StepResult`. Payload
//! values that later steps need travel on `SetupState`, not here.
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// True when the step failed and the sequence must stop.
    pub error: bool,
    /// One-line summary, present on most success and failure paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remediation lines for the user. Only read when `error` is true.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl StepResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: Some(message.into()),
            messages: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
            messages: Vec::new(),
        }
    }

    /// Failure built from a provider error.
    ///
    /// Only the outermost error text is kept; context chains and backtraces
    /// are noise for the person running the wizard.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self::failed(err.to_string())
    }

    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_error(&self) -> bool {
        self.error
    }
}
