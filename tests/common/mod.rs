//! Common test utilities for sully integration tests.
//!
//! Provides `TestEnv`, an isolated project directory plus a fake `uv` that
//! records its arguments instead of launching anything.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use assert_cmd::Command;
pub use tempfile::TempDir;

/// Stand-in for uv.
///
/// Appends its arguments to `$FAKE_UV_LOG`, one invocation per line, then
/// exits with the code scripted for the tool it was asked to run:
///
/// | invocation          | exit code from        |
/// |---------------------|-----------------------|
/// | `uv run pyright`    | `FAKE_PYRIGHT_EXIT`   |
/// | `uv run pdoc`       | `FAKE_PDOC_EXIT`      |
/// | `uv run python`     | `FAKE_SCRIPT_EXIT`    |
/// | `uv run pytest`     | `FAKE_PYTEST_EXIT`    |
/// | `uv add/remove/sync`| `FAKE_UV_EXIT`        |
const FAKE_UV: &str = r#"#!/bin/sh
if [ -n "$FAKE_UV_LOG" ]; then
    printf '%s\n' "$*" >> "$FAKE_UV_LOG"
fi
case "$1 $2" in
    "run pyright") exit "${FAKE_PYRIGHT_EXIT:-0}" ;;
    "run pdoc") exit "${FAKE_PDOC_EXIT:-0}" ;;
    "run python") exit "${FAKE_SCRIPT_EXIT:-0}" ;;
    "run pytest") exit "${FAKE_PYTEST_EXIT:-0}" ;;
esac
case "$1" in
    add|remove|sync) exit "${FAKE_UV_EXIT:-0}" ;;
esac
exit 0
"#;

/// Path to the fake uv, written once per test binary.
///
/// Writing it once (before any child is spawned) keeps concurrent tests from
/// exec'ing a file another thread still has open for writing.
pub fn fake_uv() -> &'static Path {
    static FAKE: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = FAKE.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("uv");
        std::fs::write(&path, FAKE_UV).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path
}

/// An isolated project directory with its own uv invocation log.
pub struct TestEnv {
    pub project_dir: TempDir,
    pub log_dir: TempDir,
}

impl TestEnv {
    /// Create an empty directory (no pyproject.toml).
    pub fn new() -> Self {
        Self {
            project_dir: TempDir::new().unwrap(),
            log_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a project whose pyproject.toml has the given contents.
    pub fn with_pyproject(contents: &str) -> Self {
        let env = Self::new();
        env.write("pyproject.toml", contents);
        env
    }

    /// Get a Command for the sully binary, run from the project directory
    /// against the fake uv.
    pub fn sully(&self) -> Command {
        let uv = fake_uv();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sully"));
        cmd.current_dir(self.project_dir.path());
        cmd.env("SULLY_UV", uv);
        cmd.env("FAKE_UV_LOG", self.log_path());
        cmd.env_remove("SULLY_LOG");
        cmd
    }

    /// Get the path to the project directory.
    pub fn path(&self) -> &Path {
        self.project_dir.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.path().join("uv.log")
    }

    /// Write a file relative to the project directory.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.project_dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.project_dir.path().join(rel)).unwrap()
    }

    /// Argument lines the fake uv was called with, in order.
    pub fn uv_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether any uv call started with `prefix` (e.g. `"run pyright"`).
    pub fn ran(&self, prefix: &str) -> bool {
        self.uv_calls().iter().any(|call| call.starts_with(prefix))
    }

    /// Whether an ancestor of the temp directory holds a pyproject.toml,
    /// which would make discovery succeed where a test expects it to fail.
    pub fn has_stray_pyproject(&self) -> bool {
        self.path()
            .ancestors()
            .skip(1)
            .any(|dir| dir.join("pyproject.toml").is_file())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
