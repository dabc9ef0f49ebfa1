//! PID file bookkeeping and backgrounding

use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rustix::process::{Pid, Signal, kill_process, setsid, test_kill_process};

use crate::error::AppError;

/// Set in the environment of the re-executed background child
pub const DAEMON_ENV: &str = "CROSSHAIR_DAEMON";

const PID_FILE_NAME: &str = "crosshair.pid";

/// `$XDG_RUNTIME_DIR/crosshair.pid`, else the same name in the temp dir
pub fn pid_file_path() -> PathBuf {
    pid_file_in(std::env::var_os("XDG_RUNTIME_DIR"))
}

fn pid_file_in(runtime_dir: Option<OsString>) -> PathBuf {
    match runtime_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join(PID_FILE_NAME),
        _ => std::env::temp_dir().join(PID_FILE_NAME),
    }
}

/// PID file owned by this process, removed on drop
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn create(path: &Path) -> Result<Self, AppError> {
        std::fs::write(path, std::process::id().to_string()).map_err(|source| {
            AppError::PidFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// `Ok(None)` when there is no PID file. Anything but a positive PID is an
/// error, since 0 and negative values address process groups when signalled.
pub fn read_pid(path: &Path) -> Result<Option<i32>, AppError> {
    let pid_error = |source| AppError::PidFile {
        path: path.to_path_buf(),
        source,
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(pid_error(e)),
    };
    let pid: i32 = text
        .trim()
        .parse()
        .map_err(|e| pid_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    if pid <= 0 {
        return Err(pid_error(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("PID {pid} is not a process"),
        )));
    }
    Ok(Some(pid))
}

/// Liveness check via signal 0. A process we may not signal still counts as alive.
pub fn is_running(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    let Some(pid) = Pid::from_raw(pid) else {
        return false;
    };
    match test_kill_process(pid) {
        Ok(()) => true,
        Err(e) => e == rustix::io::Errno::PERM,
    }
}

/// PID of a live instance recorded at `path`, if any
pub fn running_instance(path: &Path) -> Option<i32> {
    match read_pid(path) {
        Ok(Some(pid)) if is_running(pid) => Some(pid),
        _ => None,
    }
}

/// Send SIGTERM to the recorded instance. A stale PID file is removed.
pub fn stop_instance(path: &Path) -> Result<i32, AppError> {
    let pid = read_pid(path)?.ok_or(AppError::NotRunning("PID file does not exist"))?;

    if !is_running(pid) {
        let _ = std::fs::remove_file(path);
        return Err(AppError::NotRunning("stale PID file removed"));
    }

    let target = Pid::from_raw(pid).ok_or(AppError::NotRunning("stale PID file removed"))?;
    kill_process(target, Signal::TERM).map_err(|e| AppError::Signal {
        pid,
        source: e.into(),
    })?;

    tracing::debug!(pid, "Sent SIGTERM");
    Ok(pid)
}

/// True when this process is the background child
pub fn is_daemon_child() -> bool {
    std::env::var_os(DAEMON_ENV).is_some_and(|v| v == "1")
}

/// Arguments for the background child: ours minus `--setup`, which needs a
/// terminal and has already run in the parent
fn child_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter().filter(|arg| arg != "--setup").collect()
}

/// Re-execute this binary in a new session with null stdio.
///
/// Returns the child PID, or `None` when already running as the child.
pub fn daemonize() -> Result<Option<u32>, AppError> {
    if is_daemon_child() {
        return Ok(None);
    }

    let exe = std::env::current_exe().map_err(AppError::Spawn)?;
    let mut command = Command::new(exe);
    command
        .args(child_args(std::env::args_os().skip(1)))
        .env(DAEMON_ENV, "1")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // SAFETY: setsid is async-signal-safe and touches no parent state
    unsafe {
        command.pre_exec(|| setsid().map(drop).map_err(io::Error::from));
    }

    let child = command.spawn().map_err(AppError::Spawn)?;
    Ok(Some(child.id()))
}
