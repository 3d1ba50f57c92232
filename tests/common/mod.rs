//! Shared test infrastructure for integration tests.
//!
//! Each `TestProject` owns a temporary project root and a `bin/` directory of
//! fake `gcloud`/`firebase`/`npm` scripts placed first on PATH. Every fake
//! appends its argv to `calls.log` so tests can assert on what ran.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub const CALL_LOG_VAR: &str = "DEVSETUP_TEST_CALL_LOG";

/// Variables the binary reads; cleared so the host environment cannot leak in.
const INHERITED_VARS: &[&str] = &[
    "PROJECT_KEY",
    "NODE_ENV",
    "PACKAGE_REGISTRY_TOKEN",
    "PACKAGE_REGISTRY_ACCOUNT_URL",
    "PACKAGE_REGISTRY_URL",
    "PACKAGE_REGISTRY_SCOPE",
    "DEVSETUP_LOG",
];

pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("project"))?;
        fs::create_dir_all(temp_dir.path().join("bin"))?;
        let project = Self { temp_dir };
        for program in ["gcloud", "firebase", "npm"] {
            project.install_fake(program, 0, "")?;
        }
        Ok(project)
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    fn bin_dir(&self) -> PathBuf {
        self.temp_dir.path().join("bin")
    }

    fn call_log(&self) -> PathBuf {
        self.temp_dir.path().join("calls.log")
    }

    pub fn write_registry(&self, json: &str) -> anyhow::Result<()> {
        fs::write(self.root().join(".firebaserc"), json)?;
        Ok(())
    }

    /// Replace `program` with a script that records its arguments, prints
    /// `stderr` and exits with `exit_code`.
    pub fn install_fake(&self, program: &str, exit_code: i32, stderr: &str) -> anyhow::Result<()> {
        let script = format!(
            "#!/bin/sh\n\
             {{ printf '%s' '{program}'; for arg in \"$@\"; do printf ' %s' \"$arg\"; done; echo; }} >> \"${CALL_LOG_VAR}\"\n\
             if [ -n '{stderr}' ]; then echo '{stderr}' >&2; fi\n\
             exit {exit_code}\n"
        );
        let path = self.bin_dir().join(program);
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    /// Recorded invocations, one line per call.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.call_log())
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn read_env_file(&self) -> Option<String> {
        fs::read_to_string(self.root().join(".env")).ok()
    }

    /// Command for the binary with a clean environment and the fakes first on
    /// PATH; stdin is closed so nothing can block on a prompt.
    pub fn bare_command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_devsetup"));
        for var in INHERITED_VARS {
            command.env_remove(var);
        }
        command
            .env("PATH", self.search_path())
            .env(CALL_LOG_VAR, self.call_log())
            .stdin(Stdio::null());
        command
    }

    /// Like `bare_command`, with `args` followed by `--directory <root>`.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut command = self.bare_command();
        command.args(args).arg("--directory").arg(self.root());
        command
    }

    pub fn run(&self, args: &[&str]) -> anyhow::Result<Output> {
        Ok(self.command(args).output()?)
    }

    fn search_path(&self) -> OsString {
        let mut paths = vec![self.bin_dir()];
        if let Some(existing) = env::var_os("PATH") {
            paths.extend(env::split_paths(&existing));
        }
        env::join_paths(paths).unwrap_or_else(|_| self.bin_dir().into_os_string())
    }
}

pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
