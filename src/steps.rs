//! Setup steps.
//!
//! Each step wraps one provider call, turns whatever happens into a
//! `StepResult`, and hands the (possibly extended) state back to the runner.
//! Steps never panic and never return `Err`; provider errors become failed
//! results at this boundary.
mod cloud_project;
mod deploy_link;
mod finish;
mod registry_token;
mod runtime_mode;

pub use cloud_project::CloudProjectStep;
pub use deploy_link::DeployLinkStep;
pub use finish::FinishStep;
pub use registry_token::RegistryTokenStep;
pub use runtime_mode::RuntimeModeStep;

use crate::logger::Logger;
use crate::options::{SetupState, PROJECT_KEY_FLAG, PROJECT_KEY_VAR};
use crate::providers::CommandOutput;
use crate::registry::REGISTRY_FILE_NAME;
use crate::result::StepResult;
use crate::util::truncate_output;

/// Upper bound on command output echoed back after a failure.
const MAX_DETAIL_BYTES: usize = 4 * 1024;

pub trait Step {
    fn name(&self) -> &'static str;

    /// Run against `state` and return the outcome plus the state for the
    /// next step.
    fn run(&self, state: SetupState) -> (StepResult, SetupState);
}

/// Show a failed command's output as secondary detail.
///
/// Stderr is preferred; some CLIs only explain failures on stdout.
fn log_command_failure(logger: &dyn Logger, output: &CommandOutput) {
    let text = if output.stderr.trim().is_empty() {
        output.stdout.trim()
    } else {
        output.stderr.trim()
    };
    for line in truncate_output(text, MAX_DETAIL_BYTES).lines() {
        logger.detail(line);
    }
}

/// Remediation shared by every step that resolves a project from its key.
fn project_key_remediation(key: &str, auth_command: &str) -> Vec<String> {
    vec![
        format!(
            "1. Check the {PROJECT_KEY_VAR} environment variable or the {PROJECT_KEY_FLAG} flag (current value: {key:?})."
        ),
        format!(
            "2. Check that {REGISTRY_FILE_NAME} has a \"projects.{key}\" property naming your cloud project."
        ),
        format!("3. Run `{auth_command}` to see which account you are signed in with."),
    ]
}
