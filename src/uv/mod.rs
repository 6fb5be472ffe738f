//! Running uv.
//!
//! Every external tool sully drives (pyright, pdoc, pytest, the project's
//! own entry script) is launched through `uv`, so this is the only place
//! that spawns processes. Commands go through the [`ToolRunner`] trait so the
//! gate logic can be exercised with a scripted fake.

pub mod command;

pub use command::UvCommand;

use std::cell::OnceCell;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::{Error, Result};

/// Environment variable overriding uv discovery.
pub const UV_ENV: &str = "SULLY_UV";

/// Capability to run a uv command and report its exit code.
///
/// Child processes inherit stdout/stderr; output is never captured.
pub trait ToolRunner {
    /// Run `command` to completion and return its exit code.
    fn run(&self, command: &UvCommand) -> Result<i32>;

    /// Fail early if the runner cannot launch anything.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }
}

/// Runs commands with the real uv binary.
#[derive(Debug, Clone)]
pub struct UvRunner {
    uv: PathBuf,
}

impl UvRunner {
    pub fn new(uv: impl Into<PathBuf>) -> Self {
        Self { uv: uv.into() }
    }

    /// Locate uv (see [`locate_uv`]) and build a runner for it.
    pub fn locate() -> Result<Self> {
        Ok(Self::new(locate_uv()?))
    }
}

impl ToolRunner for UvRunner {
    fn run(&self, command: &UvCommand) -> Result<i32> {
        tracing::debug!(uv = %self.uv.display(), args = ?command.args(), cwd = ?command.cwd(), "spawning");

        let mut cmd = Command::new(&self.uv);
        cmd.args(command.args());
        if let Some(dir) = command.cwd() {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .map_err(|e| Error::Other(format!("Failed to run {}: {}", command, e)))?;
        let code = exit_code(status);

        tracing::debug!(tool = command.tool(), code, "finished");
        Ok(code)
    }
}

/// Locates uv on first use.
///
/// Commands that fail on configuration never go looking for uv, so a
/// missing pyproject.toml is reported as such even without uv installed.
#[derive(Debug, Default)]
pub struct LazyUvRunner {
    inner: OnceCell<UvRunner>,
}

impl LazyUvRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn runner(&self) -> Result<&UvRunner> {
        if let Some(runner) = self.inner.get() {
            return Ok(runner);
        }
        let located = UvRunner::locate()?;
        Ok(self.inner.get_or_init(|| located))
    }
}

impl ToolRunner for LazyUvRunner {
    fn run(&self, command: &UvCommand) -> Result<i32> {
        self.runner()?.run(command)
    }

    fn ensure_available(&self) -> Result<()> {
        self.runner().map(|_| ())
    }
}

/// Run `command` and turn a non-zero exit into [`Error::ToolFailed`].
pub fn run_checked(runner: &dyn ToolRunner, command: &UvCommand) -> Result<()> {
    match runner.run(command)? {
        0 => Ok(()),
        code => Err(Error::ToolFailed {
            tool: format!("uv {}", command.args().first().map(String::as_str).unwrap_or("")),
            code,
        }),
    }
}

/// Find the uv binary.
///
/// Order: `SULLY_UV` environment variable, then the first executable `uv`
/// on `PATH`.
pub fn locate_uv() -> Result<PathBuf> {
    if let Some(explicit) = std::env::var_os(UV_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(explicit);
        if path.is_file() {
            return Ok(path);
        }
        return Err(Error::Other(format!(
            "{} points to {}, which does not exist.",
            UV_ENV,
            path.display()
        )));
    }

    which::which("uv").map_err(|_| Error::UvNotFound)
}

/// Exit code of a finished child.
///
/// A child killed by a signal reports `128 + signal`, matching shells.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
