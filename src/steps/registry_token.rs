use super::{log_command_failure, Step};
use crate::logger::Logger;
use crate::options::SetupState;
use crate::providers::{command_line, CommandExecutor, Prompter, Providers, TokenPrompt};
use crate::result::StepResult;
use std::rc::Rc;

const PACKAGE_MANAGER: &str = "npm";
const INVALID_TOKEN_MESSAGE: &str = "The package registry token is invalid.";
const CONFIGURE_FAILED_MESSAGE: &str = "Failed to configure the package registry.";

/// Asks for the registry token and stores it in the package manager config.
pub struct RegistryTokenStep {
    executor: Rc<dyn CommandExecutor>,
    prompter: Rc<dyn Prompter>,
    logger: Rc<dyn Logger>,
}

impl RegistryTokenStep {
    pub fn new(providers: &Providers) -> Self {
        Self {
            executor: Rc::clone(&providers.executor),
            prompter: Rc::clone(&providers.prompter),
            logger: Rc::clone(&providers.logger),
        }
    }
}

impl Step for RegistryTokenStep {
    fn name(&self) -> &'static str {
        "registry-token"
    }

    fn run(&self, mut state: SetupState) -> (StepResult, SetupState) {
        self.logger.info("Configuring the package registry token");
        let settings = &state.options.package_registry;

        let label = match settings.account_url.as_deref() {
            Some(url) => format!("Package registry token (find it at {url})"),
            None => "Package registry token".to_string(),
        };
        let request = TokenPrompt {
            label,
            default: settings.default_token.clone(),
        };
        let token = match self.prompter.prompt_token(&request) {
            Ok(token) => token.trim().to_string(),
            Err(err) => return (StepResult::from_error(&err), state),
        };
        if token.is_empty() {
            return (StepResult::failed(INVALID_TOKEN_MESSAGE), state);
        }

        let Some(registry_url) = normalized_url(&settings.url) else {
            return (StepResult::failed(CONFIGURE_FAILED_MESSAGE), state);
        };
        let registry_key = match settings.scope.as_deref().map(str::trim) {
            Some(scope) if !scope.is_empty() => {
                format!("@{}:registry", scope.trim_start_matches('@'))
            }
            _ => "registry".to_string(),
        };
        let auth_key = auth_token_key(&registry_url);

        let commands = [
            command_line(&[PACKAGE_MANAGER, "config", "set", &registry_key, &registry_url]),
            command_line(&[PACKAGE_MANAGER, "config", "set", &auth_key, &token]),
        ];
        for command in &commands {
            match self.executor.execute(command) {
                Err(err) => return (StepResult::from_error(&err), state),
                Ok(output) if !output.success() => {
                    log_command_failure(self.logger.as_ref(), &output);
                    return (StepResult::failed(CONFIGURE_FAILED_MESSAGE), state);
                }
                Ok(_) => {}
            }
        }

        self.logger.success(&format!("Package registry token saved for {registry_url}"));
        let result = StepResult::ok(format!("Package registry configured for {registry_url}."));
        state.registry_token = Some(token);
        (result, state)
    }
}

fn normalized_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.ends_with('/') {
        Some(url.to_string())
    } else {
        Some(format!("{url}/"))
    }
}

/// npm keys auth tokens by the registry URL without its scheme.
fn auth_token_key(registry_url: &str) -> String {
    let without_scheme = registry_url
        .split_once("://")
        .map_or(registry_url, |(_, rest)| rest);
    format!("//{without_scheme}:_authToken")
}
