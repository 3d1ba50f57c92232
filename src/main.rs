use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

mod cancel;
mod cli;
mod logger;
mod options;
mod providers;
mod registry;
mod result;
mod runner;
mod sequence;
mod steps;
#[cfg(test)]
mod testing;
mod util;
mod workflow;

use crate::cancel::{install_interrupt_handler, ChildRegistry};
use crate::cli::{Command, RootArgs};
use crate::logger::{print_banner, ConsoleLogger, Logger};

/// Tracing filter directive; overrides `--verbose` when set.
const LOG_ENV_VAR: &str = "DEVSETUP_LOG";

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let Some(command) = args.command else {
        return match RootArgs::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        };
    };

    let children = ChildRegistry::default();
    if let Err(err) = install_interrupt_handler(children.clone()) {
        tracing::warn!(error = %err, "running without interrupt cleanup");
    }

    let logger: Rc<dyn Logger> = Rc::new(ConsoleLogger);
    let (result, banner) = match command {
        Command::Setup(args) => (
            workflow::run_setup(&args, &children, logger),
            "Development environment ready",
        ),
        Command::Link(args) => (
            workflow::run_link(&args, &children, logger),
            "Deployment project linked",
        ),
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(err) => tracing::warn!(error = %err, "could not serialize result"),
        }
    } else if !result.is_error() {
        print_banner(banner);
    }

    if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
