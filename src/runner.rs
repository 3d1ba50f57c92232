//! Sequential step runner.
//!
//! Runs steps strictly in order, threading the state returned by one step
//! into the next, and stops at the first failure. The failure is reported
//! through the logger before it is returned; the runner itself never errors.
use crate::logger::Logger;
use crate::options::SetupState;
use crate::result::StepResult;
use crate::steps::Step;

pub fn run_sequence(
    steps: &[Box<dyn Step>],
    state: SetupState,
    logger: &dyn Logger,
) -> (StepResult, SetupState) {
    let mut state = state;
    let mut last = None;
    for (index, step) in steps.iter().enumerate() {
        tracing::debug!(
            step = step.name(),
            position = index + 1,
            total = steps.len(),
            "running step"
        );
        let (result, next) = step.run(state);
        state = next;
        if result.error {
            tracing::debug!(step = step.name(), "step failed, stopping");
            report_failure(&result, logger);
            return (result, state);
        }
        last = Some(result);
    }

    match last {
        Some(result) => (result, state),
        None => {
            let result = StepResult::failed("no setup steps to run");
            report_failure(&result, logger);
            (result, state)
        }
    }
}

/// Summary at error level, then each remediation line at plain level.
pub fn report_failure(result: &StepResult, logger: &dyn Logger) {
    if let Some(message) = result.message.as_deref() {
        logger.error(message);
    }
    for line in &result.messages {
        logger.plain(line);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
