//! Per-invocation inputs and the state threaded between steps.
use crate::registry::ProjectRegistry;
use std::fmt;
use std::path::PathBuf;

/// Runtime-mode variable written by the runtime-mode step.
pub const RUNTIME_MODE_VAR: &str = "NODE_ENV";
pub const DEFAULT_RUNTIME_MODE: &str = "development";
/// Default registry key when `--projectKey` is not given.
pub const PROJECT_KEY_VAR: &str = "PROJECT_KEY";
pub const REGISTRY_TOKEN_VAR: &str = "PACKAGE_REGISTRY_TOKEN";
pub const REGISTRY_ACCOUNT_URL_VAR: &str = "PACKAGE_REGISTRY_ACCOUNT_URL";
pub const REGISTRY_URL_VAR: &str = "PACKAGE_REGISTRY_URL";
pub const REGISTRY_SCOPE_VAR: &str = "PACKAGE_REGISTRY_SCOPE";
pub const DEFAULT_REGISTRY_URL: &str = "https://npm.pkg.github.com/";

pub const ENV_FLAG: &str = "--env";
pub const PROJECT_KEY_FLAG: &str = "--projectKey";

/// Package-registry inputs for the token step.
#[derive(Clone, PartialEq, Eq)]
pub struct PackageRegistrySettings {
    pub url: String,
    pub scope: Option<String>,
    pub default_token: Option<String>,
    pub account_url: Option<String>,
}

impl fmt::Debug for PackageRegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRegistrySettings")
            .field("url", &self.url)
            .field("scope", &self.scope)
            .field("default_token", &self.default_token.as_ref().map(|_| "<redacted>"))
            .field("account_url", &self.account_url)
            .finish()
    }
}

impl Default for PackageRegistrySettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            scope: None,
            default_token: None,
            account_url: None,
        }
    }
}

/// Inputs resolved once from flags, environment and the registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub directory: PathBuf,
    pub project_key: String,
    pub env: String,
    pub registry: ProjectRegistry,
    pub package_registry: PackageRegistrySettings,
}

/// Options plus the values earlier steps hand to later ones.
///
/// Steps take the state by value and return it, so every hand-off between
/// steps is visible in the step's signature.
#[derive(Clone, PartialEq, Eq)]
pub struct SetupState {
    pub options: RunOptions,
    pub runtime_mode: Option<String>,
    pub cloud_project: Option<String>,
    pub registry_token: Option<String>,
}

impl SetupState {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            runtime_mode: None,
            cloud_project: None,
            registry_token: None,
        }
    }
}

impl fmt::Debug for SetupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupState")
            .field("options", &self.options)
            .field("runtime_mode", &self.runtime_mode)
            .field("cloud_project", &self.cloud_project)
            .field("registry_token", &self.registry_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
