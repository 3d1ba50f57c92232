//! CLI argument parsing for the onboarding wizard.
//!
//! Flags win over environment variables, which win over built-in defaults.
//! The project key additionally falls back to the first registry entry, which
//! is resolved at dispatch time once the registry has been read.
use crate::options::{
    DEFAULT_REGISTRY_URL, DEFAULT_RUNTIME_MODE, PROJECT_KEY_VAR, REGISTRY_SCOPE_VAR,
    REGISTRY_URL_VAR, RUNTIME_MODE_VAR,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "devsetup",
    version,
    about = "Set up a local development environment step by step",
    after_help = "Examples:\n  devsetup setup\n  devsetup setup --env production --projectKey staging\n  devsetup link --directory ../web --projectKey default"
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Emit debug diagnostics (DEVSETUP_LOG overrides this)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print the final result as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Setup(SetupArgs),
    Link(LinkArgs),
}

/// Inputs shared by both sequences.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Key in .firebaserc "projects" (default: the first key in the file)
    #[arg(
        long = "projectKey",
        visible_alias = "project-key",
        value_name = "KEY",
        env = PROJECT_KEY_VAR
    )]
    pub project_key: Option<String>,

    /// Project root containing .firebaserc
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,
}

#[derive(Args, Debug)]
#[command(about = "Configure runtime mode, cloud project, deploy link and registry token")]
pub struct SetupArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Runtime mode written to .env
    #[arg(long, value_name = "MODE", env = RUNTIME_MODE_VAR, default_value = DEFAULT_RUNTIME_MODE)]
    pub env: String,

    /// Package registry the token belongs to
    #[arg(long, value_name = "URL", env = REGISTRY_URL_VAR, default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Package scope routed to the registry (e.g. @acme)
    #[arg(long, value_name = "SCOPE", env = REGISTRY_SCOPE_VAR)]
    pub registry_scope: Option<String>,
}

#[derive(Args, Debug)]
#[command(about = "Select the cloud project and link the deployment project")]
pub struct LinkArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_project_key() {
        let args = RootArgs::try_parse_from([
            "devsetup",
            "setup",
            "--env",
            "production",
            "--projectKey",
            "staging",
            "--directory",
            "/srv/app",
        ])
        .expect("parse setup args");
        let Some(Command::Setup(setup)) = args.command else {
            panic!("expected setup command");
        };
        assert_eq!(setup.env, "production");
        assert_eq!(setup.target.project_key.as_deref(), Some("staging"));
        assert_eq!(setup.target.directory, PathBuf::from("/srv/app"));
    }

    #[test]
    fn no_arguments_parses_to_no_command() {
        let args = RootArgs::try_parse_from(["devsetup"]).expect("parse empty args");
        assert!(args.command.is_none());
    }

    #[test]
    fn link_rejects_env_flag() {
        assert!(RootArgs::try_parse_from(["devsetup", "link", "--env", "production"]).is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args = RootArgs::try_parse_from(["devsetup", "link", "--verbose", "--json"])
            .expect("parse link args");
        assert!(args.verbose);
        assert!(args.json);
    }
}
