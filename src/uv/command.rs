//! uv command generation.
//!
//! This module provides a builder for the argument lists sully hands to uv.
//! It does not execute anything; see [`crate::uv::ToolRunner`].

use std::path::{Path, PathBuf};

use crate::config::CheckMode;

/// Builder for a single uv invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UvCommand {
    tool: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl UvCommand {
    /// Create a new uv command for `subcommand`.
    fn new(tool: &str, subcommand: &str) -> Self {
        Self {
            tool: tool.to_string(),
            args: vec![subcommand.to_string()],
            cwd: None,
        }
    }

    /// Add a flag to the command.
    fn flag(mut self, flag: &str) -> Self {
        self.args.push(flag.to_string());
        self
    }

    /// Add a flag with a value to the command.
    fn flag_with_value(mut self, flag: &str, value: &str) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.to_string());
        self
    }

    /// Add arguments to the command.
    fn args_from<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    /// Run the command from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Short name of what this command ultimately runs (`pyright`, `add`, ...).
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Arguments passed to the uv binary.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Add dependencies.
    ///
    /// `dev` takes priority over `group`.
    ///
    /// # Example
    /// ```
    /// use sully::uv::UvCommand;
    /// let cmd = UvCommand::add(&["requests"], false, Some("lint"));
    /// assert_eq!(cmd.to_string(), "uv add --group lint requests");
    /// ```
    pub fn add<S: AsRef<str>>(packages: &[S], dev: bool, group: Option<&str>) -> Self {
        let mut cmd = Self::new("add", "add");
        if dev {
            cmd = cmd.flag("--dev");
        } else if let Some(group) = group {
            cmd = cmd.flag_with_value("--group", group);
        }
        cmd.args_from(packages)
    }

    /// Remove dependencies.
    ///
    /// # Example
    /// ```
    /// use sully::uv::UvCommand;
    /// assert_eq!(UvCommand::remove(&["a", "b"]).to_string(), "uv remove a b");
    /// ```
    pub fn remove<S: AsRef<str>>(packages: &[S]) -> Self {
        Self::new("remove", "remove").args_from(packages)
    }

    /// Install all project dependencies.
    pub fn sync() -> Self {
        Self::new("sync", "sync")
    }

    /// Pin the project's Python version.
    ///
    /// # Example
    /// ```
    /// use sully::uv::UvCommand;
    /// assert_eq!(UvCommand::pin_python("3.12").to_string(), "uv python pin 3.12");
    /// ```
    pub fn pin_python(version: &str) -> Self {
        Self::new("python-pin", "python").arg("pin").arg(version)
    }

    /// Run an arbitrary tool inside the project environment.
    pub fn run_tool<S: AsRef<str>>(tool: &str, args: &[S]) -> Self {
        let mut cmd = Self::new(tool, "run").arg(tool);
        cmd = cmd.args_from(args);
        cmd
    }

    /// Run a Python script with the project interpreter.
    ///
    /// # Example
    /// ```
    /// use sully::uv::UvCommand;
    /// let cmd = UvCommand::run_script("src/app/main.py");
    /// assert_eq!(cmd.to_string(), "uv run python src/app/main.py");
    /// assert_eq!(cmd.tool(), "python");
    /// ```
    pub fn run_script(script: &str) -> Self {
        Self::run_tool("python", &[script])
    }

    /// Type-check the project with pyright at `mode`.
    ///
    /// # Example
    /// ```
    /// use sully::config::CheckMode;
    /// use sully::uv::UvCommand;
    /// let cmd = UvCommand::pyright(CheckMode::Basic);
    /// assert_eq!(cmd.to_string(), "uv run pyright --level=basic");
    /// ```
    pub fn pyright(mode: CheckMode) -> Self {
        Self::run_tool("pyright", &[format!("--level={}", mode)])
    }

    /// Generate HTML docs for `src/` into `output`.
    ///
    /// # Example
    /// ```
    /// use sully::uv::UvCommand;
    /// let cmd = UvCommand::pdoc("docs");
    /// assert_eq!(cmd.to_string(), "uv run pdoc --output-directory=docs src/");
    /// ```
    pub fn pdoc(output: &str) -> Self {
        Self::run_tool(
            "pdoc",
            &[format!("--output-directory={}", output), "src/".to_string()],
        )
    }

    /// Run pytest with any extra arguments passed through untouched.
    pub fn pytest<S: AsRef<str>>(extra: &[S]) -> Self {
        Self::run_tool("pytest", extra)
    }

    fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }
}

impl std::fmt::Display for UvCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "uv {}", self.args.join(" "))
    }
}
