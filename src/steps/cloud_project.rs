use super::{log_command_failure, project_key_remediation, Step};
use crate::logger::Logger;
use crate::options::SetupState;
use crate::providers::{command_line, CommandExecutor, Providers};
use crate::registry::REGISTRY_FILE_NAME;
use crate::result::StepResult;
use std::rc::Rc;

const CLOUD_CLI: &str = "gcloud";
const AUTH_LIST_COMMAND: &str = "gcloud auth list";

/// Resolves the project key through the registry and selects that project
/// in the cloud CLI.
pub struct CloudProjectStep {
    executor: Rc<dyn CommandExecutor>,
    logger: Rc<dyn Logger>,
}

impl CloudProjectStep {
    pub fn new(providers: &Providers) -> Self {
        Self {
            executor: Rc::clone(&providers.executor),
            logger: Rc::clone(&providers.logger),
        }
    }
}

impl Step for CloudProjectStep {
    fn name(&self) -> &'static str {
        "cloud-project"
    }

    fn run(&self, mut state: SetupState) -> (StepResult, SetupState) {
        let key = state.options.project_key.trim().to_string();
        self.logger.info(&format!("Selecting the cloud project for key {key:?}"));

        let fail = |message: String| {
            StepResult::failed(message)
                .with_messages(project_key_remediation(&key, AUTH_LIST_COMMAND))
        };

        if key.is_empty() {
            return (fail("No project key was given.".to_string()), state);
        }
        let lookup = state
            .options
            .registry
            .project_for(&key)
            .map(|project| project.trim().to_string());
        let project = match lookup {
            Some(project) if !project.is_empty() => project,
            Some(_) => {
                let message = format!("Project key {key:?} maps to an empty project name.");
                return (fail(message), state);
            }
            None => {
                let message = format!("Project key {key:?} was not found in {REGISTRY_FILE_NAME}.");
                return (fail(message), state);
            }
        };

        let command = command_line(&[CLOUD_CLI, "config", "set", "project", &project]);
        match self.executor.execute(&command) {
            Err(err) => (StepResult::from_error(&err), state),
            Ok(output) if !output.success() => {
                log_command_failure(self.logger.as_ref(), &output);
                let message = format!("Could not select cloud project {project:?}.");
                (fail(message), state)
            }
            Ok(_) => {
                self.logger.success(&format!("Cloud project set to {project}"));
                let result = StepResult::ok(format!("Cloud project set to {project}."));
                state.cloud_project = Some(project);
                (result, state)
            }
        }
    }
}
