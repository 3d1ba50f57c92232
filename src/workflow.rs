//! Command dispatch.
//!
//! Options and the registry file are resolved exactly once here, before any
//! step runs; problems at this stage are reported the same way step failures
//! are and no external command is attempted.
use crate::cancel::ChildRegistry;
use crate::cli::{LinkArgs, SetupArgs, TargetArgs};
use crate::logger::Logger;
use crate::options::{
    PackageRegistrySettings, RunOptions, SetupState, DEFAULT_RUNTIME_MODE,
    REGISTRY_ACCOUNT_URL_VAR, REGISTRY_TOKEN_VAR,
};
use crate::providers::{DotenvFile, Providers, ShellExecutor, TerminalPrompter};
use crate::registry::{load_registry, registry_path, REGISTRY_FILE_NAME};
use crate::result::StepResult;
use crate::runner::{report_failure, run_sequence};
use crate::sequence::{link_sequence, setup_sequence, Sequence};
use crate::util::display_path;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn run_setup(args: &SetupArgs, children: &ChildRegistry, logger: Rc<dyn Logger>) -> StepResult {
    let package_registry = PackageRegistrySettings {
        url: args.registry_url.clone(),
        scope: args.registry_scope.clone(),
        default_token: env_value(REGISTRY_TOKEN_VAR),
        account_url: env_value(REGISTRY_ACCOUNT_URL_VAR),
    };
    run_command(
        &args.target,
        args.env.clone(),
        package_registry,
        children,
        logger,
        setup_sequence,
    )
}

pub fn run_link(args: &LinkArgs, children: &ChildRegistry, logger: Rc<dyn Logger>) -> StepResult {
    run_command(
        &args.target,
        DEFAULT_RUNTIME_MODE.to_string(),
        PackageRegistrySettings::default(),
        children,
        logger,
        link_sequence,
    )
}

fn run_command(
    target: &TargetArgs,
    env: String,
    package_registry: PackageRegistrySettings,
    children: &ChildRegistry,
    logger: Rc<dyn Logger>,
    build: fn(&Providers) -> Sequence,
) -> StepResult {
    let options = match resolve_options(target, env, package_registry) {
        Ok(options) => options,
        Err(result) => {
            report_failure(&result, logger.as_ref());
            return result;
        }
    };

    let env_file = DotenvFile::in_directory(&options.directory);
    tracing::debug!(env_file = %env_file.path().display(), "runtime mode store");
    let providers = Providers {
        executor: Rc::new(ShellExecutor::new(children.clone())),
        prompter: Rc::new(TerminalPrompter),
        env_store: Rc::new(env_file),
        logger,
    };
    let steps = build(&providers);
    let (result, state) = run_sequence(
        &steps,
        SetupState::new(options),
        providers.logger.as_ref(),
    );
    tracing::debug!(?state, error = result.error, "sequence finished");
    result
}

/// Resolve directory, registry and project key into `RunOptions`.
pub fn resolve_options(
    target: &TargetArgs,
    env: String,
    package_registry: PackageRegistrySettings,
) -> std::result::Result<RunOptions, StepResult> {
    if target.directory.as_os_str().is_empty() {
        return Err(StepResult::failed("No project directory was given.")
            .with_messages(directory_remediation()));
    }
    let directory = project_root(&target.directory).map_err(|err| {
        StepResult::failed(format!("{err:#}")).with_messages(directory_remediation())
    })?;
    let registry = load_registry(&directory).map_err(|err| {
        StepResult::failed(format!("{err:#}")).with_messages(registry_remediation())
    })?;

    let project_key = target
        .project_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or_else(|| registry.first_key())
        .map(str::to_string)
        .ok_or_else(|| {
            StepResult::failed(format!("{REGISTRY_FILE_NAME} does not list any projects."))
                .with_messages(registry_remediation())
        })?;

    let cwd = std::env::current_dir().ok();
    tracing::debug!(
        registry = %display_path(&registry_path(&directory), cwd.as_deref()),
        project_key = %project_key,
        "resolved options"
    );

    Ok(RunOptions {
        directory,
        project_key,
        env,
        registry,
        package_registry,
    })
}

fn project_root(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("resolve project directory {}", path.display()))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn directory_remediation() -> Vec<String> {
    vec!["1. Pass --directory <path> pointing at your project root.".to_string()]
}

fn registry_remediation() -> Vec<String> {
    vec![
        format!(
            "1. Create {REGISTRY_FILE_NAME} in your project root with a \"projects\" mapping, for example {{\"projects\":{{\"default\":\"my-cloud-project\"}}}}."
        ),
        "2. Or pass --directory <path> to point at the folder that contains it.".to_string(),
    ]
}
