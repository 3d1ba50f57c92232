use super::{log_command_failure, project_key_remediation, Step};
use crate::logger::Logger;
use crate::options::SetupState;
use crate::providers::{command_line, CommandExecutor, Providers};
use crate::result::StepResult;
use std::rc::Rc;

const DEPLOY_CLI: &str = "firebase";
const AUTH_LIST_COMMAND: &str = "firebase login:list";

/// Points the deployment CLI at the project alias named by the key.
pub struct DeployLinkStep {
    executor: Rc<dyn CommandExecutor>,
    logger: Rc<dyn Logger>,
}

impl DeployLinkStep {
    pub fn new(providers: &Providers) -> Self {
        Self {
            executor: Rc::clone(&providers.executor),
            logger: Rc::clone(&providers.logger),
        }
    }
}

impl Step for DeployLinkStep {
    fn name(&self) -> &'static str {
        "deploy-link"
    }

    fn run(&self, state: SetupState) -> (StepResult, SetupState) {
        let key = state.options.project_key.trim().to_string();
        self.logger.info(&format!("Linking the deployment project {key:?}"));

        if key.is_empty() {
            let result = StepResult::failed("No project key was given.")
                .with_messages(project_key_remediation(&key, AUTH_LIST_COMMAND));
            return (result, state);
        }

        let command = command_line(&[DEPLOY_CLI, "use", &key]);
        let result = match self.executor.execute(&command) {
            Err(err) => StepResult::from_error(&err),
            Ok(output) if !output.success() => {
                log_command_failure(self.logger.as_ref(), &output);
                StepResult::failed(format!("Could not link deployment project {key:?}."))
                    .with_messages(project_key_remediation(&key, AUTH_LIST_COMMAND))
            }
            Ok(_) => {
                let linked = match state.cloud_project.as_deref() {
                    Some(project) => format!("{key} ({project})"),
                    None => key.clone(),
                };
                self.logger.success(&format!("Deployment project linked to {linked}"));
                StepResult::ok(format!("Deployment project linked to {linked}."))
            }
        };
        (result, state)
    }
}
