use super::Step;
use crate::logger::Logger;
use crate::options::SetupState;
use crate::providers::Providers;
use crate::result::StepResult;
use std::rc::Rc;

pub struct FinishStep {
    logger: Rc<dyn Logger>,
}

impl FinishStep {
    pub fn new(providers: &Providers) -> Self {
        Self {
            logger: Rc::clone(&providers.logger),
        }
    }
}

impl Step for FinishStep {
    fn name(&self) -> &'static str {
        "finish"
    }

    fn run(&self, state: SetupState) -> (StepResult, SetupState) {
        self.logger.success("All steps finished");
        (StepResult::ok("Setup complete."), state)
    }
}
