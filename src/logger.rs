//! User-facing console output.
//!
//! Diagnostics go through `tracing`; this is only the wizard's own voice.
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A step is starting work.
    Info,
    Success,
    Error,
    /// Remediation text shown under an error.
    Plain,
    /// Secondary output such as a failed command's stderr.
    Detail,
}

pub trait Logger {
    fn log(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.log(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn plain(&self, message: &str) {
        self.log(Level::Plain, message);
    }

    fn detail(&self, message: &str) {
        self.log(Level::Detail, message);
    }
}

/// Writes styled lines to stderr.
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) {
        eprintln!("{}", render(level, message));
    }
}

fn render(level: Level, message: &str) -> String {
    match level {
        Level::Info => format!("{} {}", style("→").for_stderr().blue().bold(), message),
        Level::Success => format!("{} {}", style("✓").for_stderr().green().bold(), message),
        Level::Error => format!(
            "{} {}",
            style("✗").for_stderr().red().bold(),
            style(message).for_stderr().red().bold()
        ),
        Level::Plain => format!("  {message}"),
        Level::Detail => format!("  {}", style(message).for_stderr().dim()),
    }
}

/// Completion banner printed to stdout after a successful run.
pub fn print_banner(title: &str) {
    let width = title.chars().count() + 4;
    let rule = "═".repeat(width);
    println!();
    println!("{}", style(format!("╔{rule}╗")).green());
    println!("{}", style(format!("║  {title}  ║")).green().bold());
    println!("{}", style(format!("╚{rule}╝")).green());
    println!();
}
