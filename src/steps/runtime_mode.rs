use super::Step;
use crate::logger::Logger;
use crate::options::{SetupState, DEFAULT_RUNTIME_MODE, ENV_FLAG, RUNTIME_MODE_VAR};
use crate::providers::{EnvStore, Providers};
use crate::result::StepResult;
use std::rc::Rc;

/// Writes the requested runtime mode and reads it back to confirm.
pub struct RuntimeModeStep {
    env_store: Rc<dyn EnvStore>,
    logger: Rc<dyn Logger>,
}

impl RuntimeModeStep {
    pub fn new(providers: &Providers) -> Self {
        Self {
            env_store: Rc::clone(&providers.env_store),
            logger: Rc::clone(&providers.logger),
        }
    }
}

fn remediation() -> Vec<String> {
    vec![
        format!("1. Check the {RUNTIME_MODE_VAR} environment variable; it supplies the default mode."),
        format!("2. Or pass {ENV_FLAG} <mode>, for example {ENV_FLAG} {DEFAULT_RUNTIME_MODE}."),
    ]
}

impl Step for RuntimeModeStep {
    fn name(&self) -> &'static str {
        "runtime-mode"
    }

    fn run(&self, mut state: SetupState) -> (StepResult, SetupState) {
        let mode = state.options.env.trim().to_string();
        self.logger.info(&format!("Setting {RUNTIME_MODE_VAR} to {mode:?}"));

        if mode.is_empty() {
            let result =
                StepResult::failed("No runtime mode was given.").with_messages(remediation());
            return (result, state);
        }

        if let Err(err) = self.env_store.set(RUNTIME_MODE_VAR, &mode) {
            return (StepResult::from_error(&err), state);
        }

        match self.env_store.get(RUNTIME_MODE_VAR) {
            Err(err) => (StepResult::from_error(&err), state),
            Ok(Some(value)) if value == mode => {
                self.logger.success(&format!("{RUNTIME_MODE_VAR} is {mode}"));
                state.runtime_mode = Some(mode.clone());
                (StepResult::ok(format!("{RUNTIME_MODE_VAR} set to {mode}.")), state)
            }
            Ok(found) => {
                tracing::debug!(expected = %mode, ?found, "runtime mode did not stick");
                let result = StepResult::failed(format!(
                    "{RUNTIME_MODE_VAR} could not be set to {mode:?}."
                ))
                .with_messages(remediation());
                (result, state)
            }
        }
    }
}
