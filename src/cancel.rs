//! Interrupt handling for shelled-out commands.
//!
//! Children spawned by the executor register here while they run. On
//! SIGINT/SIGTERM every registered child is sent SIGTERM before the wizard
//! exits, so nothing is left orphaned behind an interrupted run.
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Exit code used after an interrupt (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Default)]
pub struct ChildRegistry {
    pids: Arc<Mutex<BTreeSet<u32>>>,
}

/// Removes its pid from the registry when dropped.
#[derive(Debug)]
pub struct ChildGuard {
    registry: ChildRegistry,
    pid: u32,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.pid);
    }
}

impl ChildRegistry {
    pub fn register(&self, pid: u32) -> ChildGuard {
        self.lock().insert(pid);
        ChildGuard {
            registry: self.clone(),
            pid,
        }
    }

    pub fn active(&self) -> Vec<u32> {
        self.lock().iter().copied().collect()
    }

    /// Send SIGTERM to every registered child; returns how many were signalled.
    pub fn terminate_all(&self) -> usize {
        let pids = self.active();
        pids.into_iter().filter(|pid| terminate(*pid)).count()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<u32>> {
        // The handler thread must still be able to clean up after a panic.
        self.pids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(unix)]
fn terminate(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    // SAFETY: kill(2) has no memory-safety preconditions.
    unsafe { libc::kill(pid, libc::SIGTERM) == 0 }
}

#[cfg(not(unix))]
fn terminate(_pid: u32) -> bool {
    false
}

/// Block until `pid` has exited without reaping it.
///
/// While the child is a zombie its pid cannot be reused, so a guard dropped
/// after this returns never lets the handler signal an unrelated process.
#[cfg(unix)]
pub fn wait_for_exit(pid: u32) -> Result<()> {
    let id = pid as libc::id_t;
    loop {
        // SAFETY: `info` is a valid, writable siginfo_t for the call.
        let rc = unsafe {
            let mut info: libc::siginfo_t = std::mem::zeroed();
            libc::waitid(libc::P_PID, id, &mut info, libc::WEXITED | libc::WNOWAIT)
        };
        if rc == 0 {
            return Ok(());
        }
        let err = std::io::Error::last_os_error();
        if err.kind() != std::io::ErrorKind::Interrupted {
            return Err(err).with_context(|| format!("wait for process {pid}"));
        }
    }
}

#[cfg(not(unix))]
pub fn wait_for_exit(_pid: u32) -> Result<()> {
    Ok(())
}

/// Install the process-wide SIGINT/SIGTERM handler.
pub fn install_interrupt_handler(children: ChildRegistry) -> Result<()> {
    ctrlc::set_handler(move || {
        let stopped = children.terminate_all();
        let _ = console::Term::stderr().show_cursor();
        eprintln!();
        if stopped > 0 {
            eprintln!("interrupted; stopped {stopped} running command(s)");
        } else {
            eprintln!("interrupted");
        }
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("install interrupt handler")
}
