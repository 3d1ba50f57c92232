use super::{CommandExecutor, CommandOutput};
use crate::cancel::{wait_for_exit, ChildRegistry};
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Runs commands directly (no shell), capturing stdout and stderr.
///
/// Stdin stays attached to the terminal so CLIs that ask for a login can
/// still do so. Every child is registered for interrupt cleanup while it
/// runs.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    children: ChildRegistry,
}

impl ShellExecutor {
    pub fn new(children: ChildRegistry) -> Self {
        Self { children }
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> Result<CommandOutput> {
        // The command line can carry credentials; keep it out of errors.
        let args = shell_words::split(command).context("parse command line")?;
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| anyhow!("command is empty"))?;
        let resolved = which::which(program)
            .map_err(|_| anyhow!("`{program}` is not installed or not on PATH"))?;

        let start = Instant::now();
        let mut child = Command::new(&resolved)
            .args(rest)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {program}"))?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        {
            // Unregistered before the child is reaped and its pid freed.
            let _guard = self.children.register(child.id());
            wait_for_exit(child.id()).with_context(|| format!("wait for {program}"))?;
        }
        let status = child.wait().with_context(|| format!("wait for {program}"))?;
        let stdout = join_output(stdout).with_context(|| format!("read {program} stdout"))?;
        let stderr = join_output(stderr).with_context(|| format!("read {program} stderr"))?;

        let exit_code = status.code();
        tracing::debug!(
            program = %program,
            arg_count = rest.len(),
            ?exit_code,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "command finished"
        );

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

type OutputReader = JoinHandle<std::io::Result<Vec<u8>>>;

/// Read a pipe to the end on its own thread so the child never blocks on a
/// full pipe while we wait for it.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> OutputReader {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_output(reader: OutputReader) -> Result<Vec<u8>> {
    let bytes = reader
        .join()
        .map_err(|_| anyhow!("output reader panicked"))??;
    Ok(bytes)
}
